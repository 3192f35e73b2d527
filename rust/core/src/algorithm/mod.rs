// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric geometry algorithms: orientation, area, point location and
//! segment distance.

pub mod area;
pub mod orientation;
pub mod point_location;

pub use area::{is_ccw, line_length, ring_area, signed_area};
pub use orientation::{orientation_index, Orientation};
pub use point_location::{is_in_ring, is_on_line, is_on_segment, locate_in_ring, RayCrossingCounter};

use crate::coord::Coordinate;

/// Distance from `p` to the closed segment `a`-`b`.
pub fn distance_point_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    if a.equals_2d(b) {
        return p.distance(a);
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    let r = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    if r <= 0.0 {
        return p.distance(a);
    }
    if r >= 1.0 {
        return p.distance(b);
    }
    let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / len2;
    s.abs() * len2.sqrt()
}
