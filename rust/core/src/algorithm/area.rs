// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring area, ring orientation and line length.

use crate::algorithm::orientation::{orientation_index, Orientation};
use crate::coord::Coordinate;
use crate::error::{Error, Result};

/// Signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise rings, negative for clockwise ones.
/// Coordinates are shifted to the first vertex to limit cancellation.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let x0 = ring[0].x;
    let y0 = ring[0].y;
    let mut sum = 0.0;
    for w in ring.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        sum += (a.x - x0) * (b.y - y0) - (b.x - x0) * (a.y - y0);
    }
    sum / 2.0
}

/// Unsigned area of a closed ring.
pub fn ring_area(ring: &[Coordinate]) -> f64 {
    signed_area(ring).abs()
}

/// Total length of a polyline.
pub fn line_length(pts: &[Coordinate]) -> f64 {
    pts.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Tests whether a closed ring is oriented counter-clockwise.
///
/// Uses the highest vertex: the orientation of the corner formed there, or
/// the direction of a flat top segment, decides. A flat (zero-area) ring
/// reports `false`.
pub fn is_ccw(ring: &[Coordinate]) -> Result<bool> {
    if ring.len() < 4 {
        return Err(Error::IllegalArgument(
            "ring has fewer than 4 points, so orientation cannot be determined".to_string(),
        ));
    }
    // last point repeats the first
    let n = ring.len() - 1;

    let mut up_hi = ring[0];
    let mut up_low = ring[0];
    let mut i_up_hi = 0;
    let mut prev_y = up_hi.y;
    for i in 1..=n {
        let py = ring[i].y;
        // rising segment whose top is at least as high as the best so far
        if py > prev_y && py >= up_hi.y {
            up_hi = ring[i];
            i_up_hi = i;
            up_low = ring[i - 1];
        }
        prev_y = py;
    }
    if i_up_hi == 0 {
        return Ok(false);
    }

    // walk past any flat run at the top
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi.y {
            break;
        }
    }
    let down_low = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 { i_down_low - 1 } else { n - 1 };
    let down_hi = ring[i_down_hi];

    if up_hi.equals_2d(&down_hi) {
        if up_low.equals_2d(&up_hi) || down_low.equals_2d(&up_hi) || up_low.equals_2d(&down_low) {
            return Ok(false);
        }
        Ok(orientation_index(&up_low, &up_hi, &down_low) == Orientation::CounterClockwise)
    } else {
        // flat top: direction of travel along it decides
        Ok(down_hi.x - up_hi.x < 0.0)
    }
}
