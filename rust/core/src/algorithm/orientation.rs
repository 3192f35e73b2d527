// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust orientation predicate.
//!
//! The fast path evaluates the 2x2 determinant in plain `f64` and accepts the
//! sign when it clears a forward error bound. Otherwise the determinant is
//! re-evaluated in double-double arithmetic, which is exact for the sign of
//! any determinant of `f64` differences.

use crate::coord::Coordinate;

/// Orientation of a point relative to a directed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The point is to the right of the segment.
    Clockwise,
    Collinear,
    /// The point is to the left of the segment.
    CounterClockwise,
}

impl Orientation {
    /// Signed form: -1, 0 or 1.
    pub const fn as_i32(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    pub const fn from_sign(sign: i32) -> Self {
        if sign > 0 {
            Orientation::CounterClockwise
        } else if sign < 0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    /// The orientation seen from the opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

const DP_SAFE_EPSILON: f64 = 1e-15;

/// Orientation of `q` relative to the directed segment `p1 -> p2`.
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    if let Some(sign) = orientation_filter(p1, p2, q) {
        return Orientation::from_sign(sign);
    }

    let dx1 = DoubleDouble::diff(p2.x, p1.x);
    let dy1 = DoubleDouble::diff(p2.y, p1.y);
    let dx2 = DoubleDouble::diff(q.x, p2.x);
    let dy2 = DoubleDouble::diff(q.y, p2.y);
    let det = dx1.mul(dy2).sub(dy1.mul(dx2));
    Orientation::from_sign(det.signum())
}

/// Floating-point filter. Returns `None` when the sign cannot be trusted.
fn orientation_filter(pa: &Coordinate, pb: &Coordinate, pc: &Coordinate) -> Option<i32> {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(signum(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(signum(det));
        }
        -detleft - detright
    } else {
        return Some(signum(det));
    };

    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(signum(det));
    }
    None
}

#[inline]
fn signum(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Unevaluated sum `hi + lo` with `|lo| <= ulp(hi) / 2`.
#[derive(Debug, Clone, Copy)]
struct DoubleDouble {
    hi: f64,
    lo: f64,
}

impl DoubleDouble {
    /// Exact difference `a - b`.
    fn diff(a: f64, b: f64) -> Self {
        let (hi, lo) = two_sum(a, -b);
        Self { hi, lo }
    }

    fn add(self, other: Self) -> Self {
        let (s, e) = two_sum(self.hi, other.hi);
        let e = e + self.lo + other.lo;
        let (hi, lo) = quick_two_sum(s, e);
        Self { hi, lo }
    }

    fn sub(self, other: Self) -> Self {
        self.add(Self {
            hi: -other.hi,
            lo: -other.lo,
        })
    }

    fn mul(self, other: Self) -> Self {
        let (p, e) = two_prod(self.hi, other.hi);
        let e = e + (self.hi * other.lo + self.lo * other.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Self { hi, lo }
    }

    fn signum(self) -> i32 {
        if self.hi != 0.0 {
            signum(self.hi)
        } else {
            signum(self.lo)
        }
    }
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = a.mul_add(b, -p);
    (p, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn basic_orientation() {
        let p1 = c(0.0, 0.0);
        let p2 = c(10.0, 0.0);
        assert_eq!(orientation_index(&p1, &p2, &c(5.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation_index(&p1, &p2, &c(5.0, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation_index(&p1, &p2, &c(20.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn reversing_segment_flips_orientation() {
        let p1 = c(1.5, 2.25);
        let p2 = c(-3.0, 7.75);
        let q = c(0.1, 0.2);
        let fwd = orientation_index(&p1, &p2, &q);
        let rev = orientation_index(&p2, &p1, &q);
        assert_eq!(fwd, rev.reverse());
    }

    #[test]
    fn near_collinear_points_are_consistent() {
        // classic failure case for naive evaluation
        let p1 = c(0.5, 0.5);
        let p2 = c(12.0, 12.0);
        let q = c(24.0, 24.0);
        assert_eq!(orientation_index(&p1, &p2, &q), Orientation::Collinear);

        let p1 = c(219.3649559090992, 140.84159161824724);
        let p2 = c(168.9018919682399, -5.713787599646864);
        let q = c(186.80814046338352, 46.28973405831556);
        let a = orientation_index(&p1, &p2, &q);
        let b = orientation_index(&p2, &q, &p1);
        let d = orientation_index(&q, &p1, &p2);
        assert_eq!(a, b);
        assert_eq!(b, d);
    }

    #[test]
    fn double_double_difference_is_exact() {
        let d = DoubleDouble::diff(1.0e16, 1.0);
        assert_eq!(d.hi + d.lo, 1.0e16 - 1.0);
        assert_eq!(d.signum(), 1);
        let z = DoubleDouble::diff(3.0, 3.0);
        assert_eq!(z.signum(), 0);
    }
}
