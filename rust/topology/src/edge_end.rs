// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge ends: the direction in which an edge leaves a node.
//!
//! Ends are ordered counter-clockwise around their node starting from the
//! positive x-axis. The comparison works on quadrants first and falls back
//! to the robust orientation predicate within a quadrant, so it never needs
//! an angle.

use std::cmp::Ordering;

use geo_lite_core::{orientation_index, Coordinate, Orientation};

use crate::label::Label;

/// Quadrant of a direction vector, numbered counter-clockwise from NE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Quadrant of `(dx, dy)`. Axis directions belong to the quadrant that
    /// follows them counter-clockwise; the zero vector maps to NE.
    pub fn of(dx: f64, dy: f64) -> Self {
        if dx >= 0.0 {
            if dy >= 0.0 {
                Quadrant::NorthEast
            } else {
                Quadrant::SouthEast
            }
        } else if dy >= 0.0 {
            Quadrant::NorthWest
        } else {
            Quadrant::SouthWest
        }
    }
}

/// The start of an edge as seen from a node, with its directed label.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEnd {
    pub label: Label,
    p0: Coordinate,
    p1: Coordinate,
    dx: f64,
    dy: f64,
    quadrant: Quadrant,
}

impl EdgeEnd {
    /// End leaving `p0` towards `p1`.
    pub fn new(p0: Coordinate, p1: Coordinate, label: Label) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        Self {
            label,
            p0,
            p1,
            dx,
            dy,
            quadrant: Quadrant::of(dx, dy),
        }
    }

    /// Node coordinate.
    pub fn coordinate(&self) -> Coordinate {
        self.p0
    }

    /// Second point, fixing the direction.
    pub fn directed_coordinate(&self) -> Coordinate {
        self.p1
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Counter-clockwise angular order of two ends at the same node.
    /// Collinear ends pointing the same way compare equal.
    pub fn compare_direction(&self, other: &EdgeEnd) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match orientation_index(&other.p0, &other.p1, &self.p1) {
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Clockwise => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        }
    }

    /// Angular order with a squared-length tie-break, for stars that must
    /// keep distinct ends pointing the same way.
    pub fn compare_direction_then_length(&self, other: &EdgeEnd) -> Ordering {
        self.compare_direction(other).then_with(|| {
            let a = self.dx * self.dx + self.dy * self.dy;
            let b = other.dx * other.dx + other.dy * other.dy;
            a.total_cmp(&b)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(x: f64, y: f64) -> EdgeEnd {
        EdgeEnd::new(Coordinate::new(0.0, 0.0), Coordinate::new(x, y), Label::default())
    }

    #[test]
    fn quadrants() {
        assert_eq!(Quadrant::of(1.0, 0.0), Quadrant::NorthEast);
        assert_eq!(Quadrant::of(0.0, 1.0), Quadrant::NorthEast);
        assert_eq!(Quadrant::of(-1.0, 0.0), Quadrant::NorthWest);
        assert_eq!(Quadrant::of(-1.0, -1.0), Quadrant::SouthWest);
        assert_eq!(Quadrant::of(0.0, -1.0), Quadrant::SouthEast);
    }

    #[test]
    fn ends_sort_counter_clockwise() {
        let mut ends = vec![end(1.0, -1.0), end(-1.0, 1.0), end(1.0, 0.0), end(1.0, 1.0), end(-1.0, -2.0)];
        ends.sort_by(|a, b| a.compare_direction(b));
        let dirs: Vec<_> = ends.iter().map(|e| (e.dx(), e.dy())).collect();
        assert_eq!(dirs, vec![(1.0, 0.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -2.0), (1.0, -1.0)]);
    }

    #[test]
    fn same_direction_different_length() {
        let a = end(1.0, 1.0);
        let b = end(2.0, 2.0);
        assert_eq!(a.compare_direction(&b), Ordering::Equal);
        assert_eq!(a.compare_direction_then_length(&b), Ordering::Less);
    }

    #[test]
    fn within_quadrant_uses_orientation() {
        let shallow = end(4.0, 1.0);
        let steep = end(1.0, 4.0);
        assert_eq!(shallow.compare_direction(&steep), Ordering::Less);
        assert_eq!(steep.compare_direction(&shallow), Ordering::Greater);
    }
}
