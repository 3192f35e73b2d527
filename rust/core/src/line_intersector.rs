// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust segment intersection.
//!
//! The intersector classifies a pair of segments and produces at most two
//! intersection coordinates. Classification is decided entirely by the
//! robust orientation predicate; coordinates are only constructed for
//! proper crossings, where the computation is conditioned around the centre
//! of the overlap region and clamped back to an endpoint if rounding would
//! place it outside either segment.

use crate::algorithm::{distance_point_segment, orientation_index, Orientation};
use crate::coord::Coordinate;
use crate::envelope::Envelope;

/// Outcome of the last intersection computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionKind {
    #[default]
    NoIntersection,
    /// A single shared point.
    Point,
    /// A shared sub-segment of two collinear segments.
    Collinear,
}

/// Computes and records the intersection of two segments (or a point and a
/// segment).
///
/// The last computed result stays available until the next call, so one
/// instance is reused across many segment pairs.
#[derive(Debug, Clone, Default)]
pub struct LineIntersector {
    kind: IntersectionKind,
    input: [[Coordinate; 2]; 2],
    int_pts: [Coordinate; 2],
    is_proper: bool,
}

impl LineIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests whether `p` lies on segment `p1`-`p2`.
    pub fn compute_point_intersection(&mut self, p: &Coordinate, p1: &Coordinate, p2: &Coordinate) {
        self.is_proper = false;
        self.kind = IntersectionKind::NoIntersection;
        if Envelope::segment_intersects_point(p1, p2, p)
            && orientation_index(p1, p2, p) == Orientation::Collinear
            && orientation_index(p2, p1, p) == Orientation::Collinear
        {
            self.is_proper = !(p.equals_2d(p1) || p.equals_2d(p2));
            self.int_pts[0] = p.with_z(z_get_or_interpolate(p, p1, p2));
            self.kind = IntersectionKind::Point;
        }
    }

    /// Computes the intersection of segments `p1`-`p2` and `q1`-`q2`.
    pub fn compute_intersection(&mut self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.kind = self.compute_intersect(p1, p2, q1, q2);
    }

    fn compute_intersect(&mut self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> IntersectionKind {
        self.is_proper = false;

        if !Envelope::segments_intersect(p1, p2, q1, q2) {
            return IntersectionKind::NoIntersection;
        }

        let pq1 = orientation_index(p1, p2, q1).as_i32();
        let pq2 = orientation_index(p1, p2, q2).as_i32();
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return IntersectionKind::NoIntersection;
        }

        let qp1 = orientation_index(q1, q2, p1).as_i32();
        let qp2 = orientation_index(q1, q2, p2).as_i32();
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return IntersectionKind::NoIntersection;
        }

        let collinear = pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0;
        if collinear {
            return self.compute_collinear_intersection(p1, p2, q1, q2);
        }

        // An endpoint lies on the other segment. Pick it exactly rather than
        // computing it, so that shared vertices stay bit-identical.
        let pt = if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            if p1.equals_2d(q1) || p1.equals_2d(q2) {
                copy_with_z_interpolate(p1, q1, q2)
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                copy_with_z_interpolate(p2, q1, q2)
            } else if pq1 == 0 {
                copy_with_z_interpolate(q1, p1, p2)
            } else if pq2 == 0 {
                copy_with_z_interpolate(q2, p1, p2)
            } else if qp1 == 0 {
                copy_with_z_interpolate(p1, q1, q2)
            } else {
                copy_with_z_interpolate(p2, q1, q2)
            }
        } else {
            self.is_proper = true;
            self.construct_intersection(p1, p2, q1, q2)
        };
        self.int_pts[0] = pt;
        IntersectionKind::Point
    }

    fn compute_collinear_intersection(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        let q1_in_p = Envelope::segment_intersects_point(p1, p2, q1);
        let q2_in_p = Envelope::segment_intersects_point(p1, p2, q2);
        let p1_in_q = Envelope::segment_intersects_point(q1, q2, p1);
        let p2_in_q = Envelope::segment_intersects_point(q1, q2, p2);

        if q1_in_p && q2_in_p {
            self.int_pts = [
                copy_with_z_interpolate(q1, p1, p2),
                copy_with_z_interpolate(q2, p1, p2),
            ];
            return IntersectionKind::Collinear;
        }
        if p1_in_q && p2_in_q {
            self.int_pts = [
                copy_with_z_interpolate(p1, q1, q2),
                copy_with_z_interpolate(p2, q1, q2),
            ];
            return IntersectionKind::Collinear;
        }
        if q1_in_p && p1_in_q {
            self.int_pts = [copy_with_z_interpolate(q1, p1, p2), copy_with_z_interpolate(p1, q1, q2)];
            return touch_or_overlap(q1.equals_2d(p1) && !q2_in_p && !p2_in_q);
        }
        if q1_in_p && p2_in_q {
            self.int_pts = [copy_with_z_interpolate(q1, p1, p2), copy_with_z_interpolate(p2, q1, q2)];
            return touch_or_overlap(q1.equals_2d(p2) && !q2_in_p && !p1_in_q);
        }
        if q2_in_p && p1_in_q {
            self.int_pts = [copy_with_z_interpolate(q2, p1, p2), copy_with_z_interpolate(p1, q1, q2)];
            return touch_or_overlap(q2.equals_2d(p1) && !q1_in_p && !p2_in_q);
        }
        if q2_in_p && p2_in_q {
            self.int_pts = [copy_with_z_interpolate(q2, p1, p2), copy_with_z_interpolate(p2, q1, q2)];
            return touch_or_overlap(q2.equals_2d(p2) && !q1_in_p && !p1_in_q);
        }
        IntersectionKind::NoIntersection
    }

    /// Constructs the crossing point of two properly intersecting segments.
    fn construct_intersection(&self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
        let mut pt = match conditioned_intersection(p1, p2, q1, q2) {
            Some(pt) if in_segment_envelopes(&pt, p1, p2, q1, q2) => pt,
            _ => nearest_endpoint(p1, p2, q1, q2),
        };
        pt.z = average_z(z_interpolate(&pt, p1, p2), z_interpolate(&pt, q1, q2));
        pt
    }

    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::NoIntersection
    }

    /// Number of intersection points: 0, 1 or 2.
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::NoIntersection => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    pub fn intersection(&self, index: usize) -> Coordinate {
        self.int_pts[index]
    }

    /// A single intersection point interior to both segments.
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.is_proper
    }

    /// `true` if `pt` is one of the computed intersection points.
    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.int_pts[..self.intersection_num()].iter().any(|c| c.equals_2d(pt))
    }

    /// `true` if some intersection point is interior to either input segment.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// `true` if some intersection point is not an endpoint of input segment
    /// `input_index`.
    pub fn is_interior_intersection_of(&self, input_index: usize) -> bool {
        let [a, b] = &self.input[input_index];
        self.int_pts[..self.intersection_num()]
            .iter()
            .any(|pt| !(pt.equals_2d(a) || pt.equals_2d(b)))
    }

    /// Distance of intersection `int_index` along input segment
    /// `segment_index`, for ordering points along an edge.
    pub fn edge_distance(&self, segment_index: usize, int_index: usize) -> f64 {
        let [p0, p1] = &self.input[segment_index];
        compute_edge_distance(&self.int_pts[int_index], p0, p1)
    }
}

fn touch_or_overlap(single_point: bool) -> IntersectionKind {
    if single_point {
        IntersectionKind::Point
    } else {
        IntersectionKind::Collinear
    }
}

/// Fast, monotonic distance of `p` along segment `p0`-`p1`.
///
/// Exact for points on the segment's major axis and never zero for points
/// other than `p0`.
pub fn compute_edge_distance(p: &Coordinate, p0: &Coordinate, p1: &Coordinate) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if p.equals_2d(p0) {
        return 0.0;
    }
    if p.equals_2d(p1) {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    if dist == 0.0 {
        // p differs from p0 only along the minor axis
        return pdx.max(pdy);
    }
    dist
}

fn conditioned_intersection(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Option<Coordinate> {
    let int_min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
    let int_max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
    let int_min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
    let int_max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));

    let mid_x = (int_min_x + int_max_x) / 2.0;
    let mid_y = (int_min_y + int_max_y) / 2.0;

    let p1x = p1.x - mid_x;
    let p1y = p1.y - mid_y;
    let p2x = p2.x - mid_x;
    let p2y = p2.y - mid_y;
    let q1x = q1.x - mid_x;
    let q1y = q1.y - mid_y;
    let q2x = q2.x - mid_x;
    let q2y = q2.y - mid_y;

    // homogeneous line coefficients
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = x / w;
    let y_int = y / w;
    if !x_int.is_finite() || !y_int.is_finite() {
        return None;
    }
    Some(Coordinate::new(x_int + mid_x, y_int + mid_y))
}

fn in_segment_envelopes(pt: &Coordinate, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> bool {
    Envelope::segment_intersects_point(p1, p2, pt) && Envelope::segment_intersects_point(q1, q2, pt)
}

/// The endpoint closest to the other segment. Used when the computed point
/// is unusable; for nearly parallel segments it is a good approximation.
fn nearest_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let candidates = [
        (p1, distance_point_segment(p1, q1, q2)),
        (p2, distance_point_segment(p2, q1, q2)),
        (q1, distance_point_segment(q1, p1, p2)),
        (q2, distance_point_segment(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for cand in &candidates[1..] {
        if cand.1 < best.1 {
            best = *cand;
        }
    }
    Coordinate::new(best.0.x, best.0.y)
}

fn copy_with_z_interpolate(p: &Coordinate, p1: &Coordinate, p2: &Coordinate) -> Coordinate {
    p.with_z(z_get_or_interpolate(p, p1, p2))
}

fn z_get_or_interpolate(p: &Coordinate, p1: &Coordinate, p2: &Coordinate) -> Option<f64> {
    p.z.or_else(|| z_interpolate(p, p1, p2))
}

/// Linear interpolation of z at `p` along `p1`-`p2`. A segment with z
/// at one end only yields that z.
pub fn z_interpolate(p: &Coordinate, p1: &Coordinate, p2: &Coordinate) -> Option<f64> {
    let (z1, z2) = match (p1.z, p2.z) {
        (None, None) => return None,
        (Some(z), None) | (None, Some(z)) => return Some(z),
        (Some(z1), Some(z2)) => (z1, z2),
    };
    if p.equals_2d(p1) {
        return Some(z1);
    }
    if p.equals_2d(p2) {
        return Some(z2);
    }
    let dz = z2 - z1;
    if dz == 0.0 {
        return Some(z1);
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let seg_len = dx * dx + dy * dy;
    let xoff = p.x - p1.x;
    let yoff = p.y - p1.y;
    let plen = xoff * xoff + yoff * yoff;
    let frac = (plen / seg_len).sqrt();
    Some(z1 + dz * frac)
}

fn average_z(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn proper_crossing() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(10.0, 10.0), &c(0.0, 10.0), &c(10.0, 0.0));
        assert_eq!(li.kind(), IntersectionKind::Point);
        assert!(li.is_proper());
        assert_eq!(li.intersection(0), c(5.0, 5.0));
        assert!(li.is_interior_intersection());
    }

    #[test]
    fn disjoint_segments() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(1.0, 1.0), &c(2.0, 0.0), &c(3.0, 1.0));
        assert!(!li.has_intersection());
        assert_eq!(li.intersection_num(), 0);
    }

    #[test]
    fn endpoint_touch_is_not_proper() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, 0.0), &c(5.0, 5.0));
        assert_eq!(li.kind(), IntersectionKind::Point);
        assert!(!li.is_proper());
        assert_eq!(li.intersection(0), c(5.0, 0.0));
        assert!(li.is_interior_intersection_of(0));
        assert!(!li.is_interior_intersection_of(1));
    }

    #[test]
    fn collinear_overlap() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, 0.0), &c(15.0, 0.0));
        assert_eq!(li.kind(), IntersectionKind::Collinear);
        assert!(li.is_intersection(&c(5.0, 0.0)));
        assert!(li.is_intersection(&c(10.0, 0.0)));
    }

    #[test]
    fn collinear_touch_at_single_point() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(10.0, 0.0), &c(20.0, 0.0));
        assert_eq!(li.kind(), IntersectionKind::Point);
        assert_eq!(li.intersection(0), c(10.0, 0.0));
    }

    #[test]
    fn z_is_interpolated_and_averaged() {
        let mut li = LineIntersector::new();
        li.compute_intersection(
            &Coordinate::new_z(0.0, 0.0, 0.0),
            &Coordinate::new_z(10.0, 0.0, 10.0),
            &Coordinate::new_z(5.0, -5.0, 20.0),
            &Coordinate::new_z(5.0, 5.0, 20.0),
        );
        let z = li.intersection(0).z.unwrap();
        assert_relative_eq!(z, (5.0 + 20.0) / 2.0);
    }

    #[test]
    fn z_skipped_without_input_z() {
        let mut li = LineIntersector::new();
        li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, -5.0), &c(5.0, 5.0));
        assert!(li.intersection(0).z.is_none());
    }

    #[test]
    fn point_on_segment() {
        let mut li = LineIntersector::new();
        li.compute_point_intersection(&c(2.0, 2.0), &c(0.0, 0.0), &c(4.0, 4.0));
        assert!(li.has_intersection());
        assert!(li.is_proper());
        li.compute_point_intersection(&c(0.0, 0.0), &c(0.0, 0.0), &c(4.0, 4.0));
        assert!(li.has_intersection());
        assert!(!li.is_proper());
        li.compute_point_intersection(&c(2.0, 3.0), &c(0.0, 0.0), &c(4.0, 4.0));
        assert!(!li.has_intersection());
    }

    #[test]
    fn edge_distance_orders_points() {
        let p0 = c(0.0, 0.0);
        let p1 = c(10.0, 2.0);
        assert_eq!(compute_edge_distance(&p0, &p0, &p1), 0.0);
        assert_eq!(compute_edge_distance(&p1, &p0, &p1), 10.0);
        let a = compute_edge_distance(&c(3.0, 0.6), &p0, &p1);
        let b = compute_edge_distance(&c(7.0, 1.4), &p0, &p1);
        assert!(a < b);
    }
}
