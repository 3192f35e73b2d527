// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-ring and point-on-line tests.

use crate::algorithm::orientation::{orientation_index, Orientation};
use crate::coord::Coordinate;
use crate::envelope::Envelope;
use crate::location::Location;

/// Counts crossings of a rightward horizontal ray from a query point.
///
/// Segments can be fed in any order; a point found to lie on a segment is
/// reported as on the boundary regardless of the count.
#[derive(Debug, Clone)]
pub struct RayCrossingCounter {
    p: Coordinate,
    crossing_count: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    pub fn new(p: Coordinate) -> Self {
        Self {
            p,
            crossing_count: 0,
            on_segment: false,
        }
    }

    /// Accounts for the segment `p1 -> p2`.
    pub fn count_segment(&mut self, p1: &Coordinate, p2: &Coordinate) {
        let p = &self.p;
        // entirely to the left of the ray origin
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p.equals_2d(p2) {
            self.on_segment = true;
            return;
        }
        // horizontal segment at the ray's height
        if p1.y == p.y && p2.y == p.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if p.x >= min_x && p.x <= max_x {
                self.on_segment = true;
            }
            return;
        }
        // straddles the ray: upward edges include their start, downward their end
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == Orientation::Collinear {
                self.on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            if orient == Orientation::CounterClockwise {
                self.crossing_count += 1;
            }
        }
    }

    pub fn is_on_segment(&self) -> bool {
        self.on_segment
    }

    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossing_count % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// Location of `p` relative to a closed ring.
pub fn locate_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut counter = RayCrossingCounter::new(*p);
    for w in ring.windows(2) {
        counter.count_segment(&w[1], &w[0]);
        if counter.is_on_segment() {
            return Location::Boundary;
        }
    }
    counter.location()
}

/// `true` when `p` is inside a ring or on its boundary.
pub fn is_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
    locate_in_ring(p, ring) != Location::Exterior
}

/// `true` when `p` lies on any segment of a polyline.
pub fn is_on_line(p: &Coordinate, line: &[Coordinate]) -> bool {
    if line.len() == 1 {
        return p.equals_2d(&line[0]);
    }
    line.windows(2).any(|w| is_on_segment(p, &w[0], &w[1]))
}

/// `true` when `p` lies on the closed segment `p1`-`p2`.
pub fn is_on_segment(p: &Coordinate, p1: &Coordinate, p2: &Coordinate) -> bool {
    Envelope::segment_intersects_point(p1, p2, p)
        && orientation_index(p1, p2, p) == Orientation::Collinear
        && orientation_index(p2, p1, p) == Orientation::Collinear
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Coordinate> {
        v.iter().map(|&p| Coordinate::from(p)).collect()
    }

    #[test]
    fn locate_in_square() {
        let ring = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_eq!(locate_in_ring(&Coordinate::new(5.0, 5.0), &ring), Location::Interior);
        assert_eq!(locate_in_ring(&Coordinate::new(15.0, 5.0), &ring), Location::Exterior);
        assert_eq!(locate_in_ring(&Coordinate::new(10.0, 5.0), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(&Coordinate::new(0.0, 0.0), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(&Coordinate::new(5.0, 10.0), &ring), Location::Boundary);
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // diamond: the ray from (0,0) passes exactly through vertex (2,0)
        let ring = pts(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0), (2.0, 0.0)]);
        assert_eq!(locate_in_ring(&Coordinate::new(0.0, 0.0), &ring), Location::Interior);
        assert_eq!(locate_in_ring(&Coordinate::new(-3.0, 0.0), &ring), Location::Exterior);
    }

    #[test]
    fn concave_ring() {
        let ring = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0), (0.0, 0.0)]);
        assert_eq!(locate_in_ring(&Coordinate::new(2.0, 3.0), &ring), Location::Exterior);
        assert_eq!(locate_in_ring(&Coordinate::new(2.0, 0.5), &ring), Location::Interior);
        assert!(is_in_ring(&Coordinate::new(2.0, 1.0), &ring));
    }

    #[test]
    fn point_on_line() {
        let line = pts(&[(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)]);
        assert!(is_on_line(&Coordinate::new(2.0, 2.0), &line));
        assert!(is_on_line(&Coordinate::new(8.0, 0.0), &line));
        assert!(!is_on_line(&Coordinate::new(4.0, 0.0), &line));
        assert!(!is_on_line(&Coordinate::new(10.0, -2.0), &line));
    }
}
