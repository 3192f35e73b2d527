// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar coordinates with an optional elevation.
//!
//! Topology is strictly two-dimensional: equality, ordering and hashing only
//! look at `x` and `y`. The `z` value rides along and is interpolated where
//! new vertices are created.

use std::cmp::Ordering;
use std::fmt;

/// A point in the plane with optional elevation.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub z: Option<f64>,
}

impl Coordinate {
    /// Creates a 2D coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate carrying an elevation.
    pub const fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Exact floating-point equality on `x` and `y`.
    #[inline]
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Euclidean distance in the plane.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Lexicographic comparison on `x`, then `y`.
    pub fn compare(&self, other: &Coordinate) -> Ordering {
        self.key().cmp(&other.key())
    }

    /// `true` when both planar ordinates are finite (z is not checked).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Totally ordered key for maps keyed by location.
    #[inline]
    pub fn key(&self) -> CoordKey {
        CoordKey {
            x: ordered_bits(self.x),
            y: ordered_bits(self.y),
        }
    }

    /// Same planar position with the elevation replaced.
    pub fn with_z(self, z: Option<f64>) -> Self {
        Self { z, ..self }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new_z(x, y, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "({} {} {})", self.x, self.y, z),
            None => write!(f, "({} {})", self.x, self.y),
        }
    }
}

/// Hashable, totally ordered stand-in for a coordinate's planar position.
///
/// Orders by `x` then `y`. Negative zero collapses onto positive zero so that
/// the key agrees with `Coordinate::equals_2d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey {
    x: i64,
    y: i64,
}

fn ordered_bits(v: f64) -> i64 {
    let bits = (v + 0.0).to_bits() as i64;
    bits ^ ((((bits >> 63) as u64) >> 1) as i64)
}
