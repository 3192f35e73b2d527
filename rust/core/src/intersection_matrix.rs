// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimensionally extended nine-intersection matrix (DE-9IM).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::location::{Dimension, Location};

/// Dimensions of the pairwise intersections of the interior, boundary and
/// exterior of two geometries. Rows index the first geometry, columns the
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl IntersectionMatrix {
    /// All entries `F`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: Location, col: Location) -> Dimension {
        self.matrix[row.index()][col.index()]
    }

    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        self.matrix[row.index()][col.index()] = dim;
    }

    pub fn set_all(&mut self, dim: Dimension) {
        self.matrix = [[dim; 3]; 3];
    }

    /// Raises an entry to at least `dim`.
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimension) {
        let cell = &mut self.matrix[row.index()][col.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// Like [`set_at_least`](Self::set_at_least), ignoring unknown locations.
    pub fn set_at_least_if_valid(&mut self, row: Option<Location>, col: Option<Location>, dim: Dimension) {
        if let (Some(row), Some(col)) = (row, col) {
            self.set_at_least(row, col, dim);
        }
    }

    /// Raises entries to the minimum dimensions in a 9-character pattern.
    /// Characters other than `F012` leave the entry unchanged.
    pub fn set_at_least_pattern(&mut self, pattern: &str) -> Result<()> {
        let chars = pattern_chars(pattern)?;
        for (i, ch) in chars.iter().enumerate() {
            if let Some(dim) = Dimension::from_symbol(*ch) {
                let cell = &mut self.matrix[i / 3][i % 3];
                if *cell < dim {
                    *cell = dim;
                }
            }
        }
        Ok(())
    }

    /// Tests the matrix against a 9-character pattern over `T F * 0 1 2`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let chars = pattern_chars(pattern)?;
        for (i, ch) in chars.iter().enumerate() {
            let actual = self.matrix[i / 3][i % 3];
            let ok = match ch {
                '*' => true,
                'T' | 't' => actual != Dimension::False,
                'F' | 'f' => actual == Dimension::False,
                '0' => actual == Dimension::Point,
                '1' => actual == Dimension::Line,
                '2' => actual == Dimension::Area,
                other => {
                    return Err(Error::IllegalArgument(format!(
                        "invalid intersection matrix pattern symbol '{}'",
                        other
                    )))
                }
            };
            if !ok {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Swaps the roles of the two geometries.
    pub fn transpose(&self) -> Self {
        let mut out = *self;
        for r in 0..3 {
            for c in 0..3 {
                out.matrix[r][c] = self.matrix[c][r];
            }
        }
        out
    }

    fn at(&self, row: Location, col: Location) -> Dimension {
        self.get(row, col)
    }

    fn is_true(&self, row: Location, col: Location) -> bool {
        self.at(row, col) != Dimension::False
    }

    fn is_false(&self, row: Location, col: Location) -> bool {
        self.at(row, col) == Dimension::False
    }

    pub fn is_disjoint(&self) -> bool {
        use Location::{Boundary as B, Interior as I};
        self.is_false(I, I) && self.is_false(I, B) && self.is_false(B, I) && self.is_false(B, B)
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// The geometries share boundary points but no interior points.
    /// Always `false` for two puntal geometries.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Interior as I};
        if dim_a > dim_b {
            return self.is_touches(dim_b, dim_a);
        }
        let applicable = matches!(
            (dim_a, dim_b),
            (Dimension::Area, Dimension::Area)
                | (Dimension::Line, Dimension::Line)
                | (Dimension::Line, Dimension::Area)
                | (Dimension::Point, Dimension::Area)
                | (Dimension::Point, Dimension::Line)
        );
        applicable && self.is_false(I, I) && (self.is_true(I, B) || self.is_true(B, I) || self.is_true(B, B))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::{Area as A, Line as L, Point as P};
        use Location::{Exterior as E, Interior as I};
        match (dim_a, dim_b) {
            (P, L) | (P, A) | (L, A) => self.is_true(I, I) && self.is_true(I, E),
            (L, P) | (A, P) | (A, L) => self.is_true(I, I) && self.is_true(E, I),
            (L, L) => self.at(I, I) == Dimension::Point,
            _ => false,
        }
    }

    pub fn is_within(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.is_true(I, I) && self.is_false(I, E) && self.is_false(B, E)
    }

    pub fn is_contains(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.is_true(I, I) && self.is_false(E, I) && self.is_false(E, B)
    }

    fn has_point_in_common(&self) -> bool {
        use Location::{Boundary as B, Interior as I};
        self.is_true(I, I) || self.is_true(I, B) || self.is_true(B, I) || self.is_true(B, B)
    }

    pub fn is_covers(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.has_point_in_common() && self.is_false(E, I) && self.is_false(E, B)
    }

    pub fn is_covered_by(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.has_point_in_common() && self.is_false(I, E) && self.is_false(B, E)
    }

    /// Topological equality. Geometries of different dimension are never equal.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        if dim_a != dim_b {
            return false;
        }
        self.is_true(I, I) && self.is_false(I, E) && self.is_false(B, E) && self.is_false(E, I) && self.is_false(E, B)
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Exterior as E, Interior as I};
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Area, Dimension::Area) => {
                self.is_true(I, I) && self.is_true(I, E) && self.is_true(E, I)
            }
            (Dimension::Line, Dimension::Line) => {
                self.at(I, I) == Dimension::Line && self.is_true(I, E) && self.is_true(E, I)
            }
            _ => false,
        }
    }
}

fn pattern_chars(pattern: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() != 9 {
        return Err(Error::IllegalArgument(format!(
            "intersection matrix pattern must have 9 symbols, found '{}'",
            pattern
        )));
    }
    Ok(chars)
}

impl FromStr for IntersectionMatrix {
    type Err = Error;

    /// Parses the 9-symbol `F012` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let chars = pattern_chars(s)?;
        let mut im = IntersectionMatrix::new();
        for (i, ch) in chars.iter().enumerate() {
            let dim = Dimension::from_symbol(*ch).ok_or_else(|| {
                Error::IllegalArgument(format!("invalid dimension symbol '{}' in '{}'", ch, s))
            })?;
            im.matrix[i / 3][i % 3] = dim;
        }
        Ok(im)
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            for dim in row {
                write!(f, "{}", dim.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn im(s: &str) -> IntersectionMatrix {
        s.parse().unwrap()
    }

    #[test]
    fn display_round_trips_through_parse() {
        let m = im("212101212");
        assert_eq!(m.to_string(), "212101212");
        assert_eq!(IntersectionMatrix::new().to_string(), "FFFFFFFFF");
    }

    #[test]
    fn set_at_least_only_raises() {
        let mut m = IntersectionMatrix::new();
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Line);
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Point);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimension::Line);
        m.set_at_least_if_valid(None, Some(Location::Boundary), Dimension::Area);
        assert_eq!(m.to_string(), "1FFFFFFFF");
        m.set_at_least_pattern("F0FFFFFF2").unwrap();
        assert_eq!(m.to_string(), "10FFFFFF2");
    }

    #[test]
    fn pattern_matching() {
        let m = im("212101212");
        assert!(m.matches("T*T***T**").unwrap());
        assert!(m.matches("2********").unwrap());
        assert!(!m.matches("F********").unwrap());
        assert!(m.matches("T*T").is_err());
        assert!(m.matches("X********").is_err());
    }

    #[test]
    fn named_predicates_for_overlapping_areas() {
        let m = im("212101212");
        assert!(m.is_intersects());
        assert!(m.is_overlaps(Dimension::Area, Dimension::Area));
        assert!(!m.is_within());
        assert!(!m.is_touches(Dimension::Area, Dimension::Area));
    }

    #[test]
    fn named_predicates_for_touching_areas() {
        let m = im("FF2F11212");
        assert!(m.is_touches(Dimension::Area, Dimension::Area));
        assert!(!m.is_disjoint());
        assert!(!m.is_overlaps(Dimension::Area, Dimension::Area));
    }

    #[test]
    fn within_and_contains_are_transposes() {
        let m = im("2FF1FF212");
        assert!(m.is_within());
        assert!(m.is_covered_by());
        assert!(m.transpose().is_contains());
        assert!(m.transpose().is_covers());
    }

    #[test]
    fn crossing_lines() {
        let m = im("0F1FF0102");
        assert!(m.is_crosses(Dimension::Line, Dimension::Line));
        assert!(!m.is_crosses(Dimension::Area, Dimension::Area));
    }

    #[test]
    fn equality_requires_same_dimension() {
        let m = im("2FFF1FFF2");
        assert!(m.is_equals(Dimension::Area, Dimension::Area));
        assert!(!m.is_equals(Dimension::Area, Dimension::Line));
    }
}
