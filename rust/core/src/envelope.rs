// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding rectangles.

use crate::coord::Coordinate;

/// An axis-aligned rectangle, possibly null (covering nothing).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Envelope {
    /// The null envelope. It intersects and covers nothing.
    pub const fn null() -> Self {
        Self {
            min_x: 0.0,
            max_x: -1.0,
            min_y: 0.0,
            max_y: -1.0,
        }
    }

    /// Envelope spanning two corner points in any order.
    pub fn new(p: Coordinate, q: Coordinate) -> Self {
        Self {
            min_x: p.x.min(q.x),
            max_x: p.x.max(q.x),
            min_y: p.y.min(q.y),
            max_y: p.y.max(q.y),
        }
    }

    /// Envelope of a single segment.
    pub fn of_segment(p1: &Coordinate, p2: &Coordinate) -> Self {
        Self::new(*p1, *p2)
    }

    /// Smallest envelope containing all coordinates.
    pub fn from_coords<'a, I>(coords: I) -> Self
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut env = Self::null();
        for c in coords {
            env.expand_to_include(c);
        }
        env
    }

    pub fn is_null(&self) -> bool {
        self.max_x < self.min_x
    }

    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grows the envelope to include a coordinate.
    pub fn expand_to_include(&mut self, c: &Coordinate) {
        if self.is_null() {
            self.min_x = c.x;
            self.max_x = c.x;
            self.min_y = c.y;
            self.max_y = c.y;
            return;
        }
        self.min_x = self.min_x.min(c.x);
        self.max_x = self.max_x.max(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_y = self.max_y.max(c.y);
    }

    /// Grows the envelope to include another envelope.
    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if other.is_null() {
            return;
        }
        if self.is_null() {
            *self = *other;
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    pub fn intersects_coord(&self, c: &Coordinate) -> bool {
        !self.is_null()
            && c.x >= self.min_x
            && c.x <= self.max_x
            && c.y >= self.min_y
            && c.y <= self.max_y
    }

    /// `true` if `other` lies entirely within this envelope (boundary included).
    pub fn covers(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn covers_coord(&self, c: &Coordinate) -> bool {
        self.intersects_coord(c)
    }

    /// Overlap of two envelopes; null when they are disjoint.
    pub fn intersection(&self, other: &Envelope) -> Envelope {
        if !self.intersects(other) {
            return Envelope::null();
        }
        Envelope {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Tests whether `q` lies in the envelope of segment `p1`-`p2`.
    #[inline]
    pub fn segment_intersects_point(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> bool {
        q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
    }

    /// Tests whether the envelopes of segments `p1`-`p2` and `q1`-`q2` overlap.
    #[inline]
    pub fn segments_intersect(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> bool {
        let min_q = q1.x.min(q2.x);
        let max_q = q1.x.max(q2.x);
        let min_p = p1.x.min(p2.x);
        let max_p = p1.x.max(p2.x);
        if min_p > max_q || max_p < min_q {
            return false;
        }
        let min_q = q1.y.min(q2.y);
        let max_q = q1.y.max(q2.y);
        let min_p = p1.y.min(p2.y);
        let max_p = p1.y.max(p2.y);
        !(min_p > max_q || max_p < min_q)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope {
        Envelope::new(Coordinate::new(x0, y0), Coordinate::new(x1, y1))
    }

    #[test]
    fn null_envelope_is_inert() {
        let null = Envelope::null();
        assert!(null.is_null());
        assert!(!null.intersects(&env(0.0, 0.0, 1.0, 1.0)));
        assert!(!null.intersects_coord(&Coordinate::new(0.0, 0.0)));
        assert_eq!(null.area(), 0.0);
    }

    #[test]
    fn expand_from_null() {
        let mut e = Envelope::null();
        e.expand_to_include(&Coordinate::new(2.0, 3.0));
        e.expand_to_include(&Coordinate::new(-1.0, 5.0));
        assert_eq!(e, env(-1.0, 3.0, 2.0, 5.0));
    }

    #[test]
    fn intersection_of_overlapping() {
        let a = env(0.0, 0.0, 2.0, 2.0);
        let b = env(1.0, 1.0, 3.0, 3.0);
        assert_eq!(a.intersection(&b), env(1.0, 1.0, 2.0, 2.0));
        assert!(a.intersection(&env(5.0, 5.0, 6.0, 6.0)).is_null());
    }

    #[test]
    fn touching_envelopes_intersect() {
        let a = env(0.0, 0.0, 1.0, 1.0);
        let b = env(1.0, 0.0, 2.0, 1.0);
        assert!(a.intersects(&b));
        assert!(!a.covers(&b));
        assert!(env(0.0, 0.0, 5.0, 5.0).covers(&a));
    }

    #[test]
    fn segment_envelope_tests() {
        let p1 = Coordinate::new(0.0, 0.0);
        let p2 = Coordinate::new(2.0, 2.0);
        assert!(Envelope::segment_intersects_point(&p1, &p2, &Coordinate::new(1.0, 0.5)));
        assert!(!Envelope::segment_intersects_point(&p1, &p2, &Coordinate::new(3.0, 0.5)));
        assert!(Envelope::segments_intersect(
            &p1,
            &p2,
            &Coordinate::new(2.0, 0.0),
            &Coordinate::new(0.0, 2.0)
        ));
        assert!(!Envelope::segments_intersect(
            &p1,
            &p2,
            &Coordinate::new(3.0, 0.0),
            &Coordinate::new(4.0, 2.0)
        ));
    }
}
