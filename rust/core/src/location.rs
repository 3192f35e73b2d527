// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topological location of a point relative to a geometry, and the
//! dimension values used by the intersection matrix.

use std::fmt;

/// Where a point lies relative to a geometry.
///
/// An absent location (not yet known) is modelled as `Option<Location>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Row/column index in an intersection matrix.
    pub const fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Location> {
        match index {
            0 => Some(Location::Interior),
            1 => Some(Location::Boundary),
            2 => Some(Location::Exterior),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Interior => "INTERIOR",
            Location::Boundary => "BOUNDARY",
            Location::Exterior => "EXTERIOR",
        };
        f.write_str(name)
    }
}

/// Topological dimension of a point set. `False` is the empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    #[default]
    False,
    Point,
    Line,
    Area,
}

impl Dimension {
    /// Intersection-matrix symbol: `F`, `0`, `1` or `2`.
    pub const fn symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Line => '1',
            Dimension::Area => '2',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Dimension> {
        match c {
            'F' | 'f' => Some(Dimension::False),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Line),
            '2' => Some(Dimension::Area),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_index_round_trip() {
        for loc in [Location::Interior, Location::Boundary, Location::Exterior] {
            assert_eq!(Location::from_index(loc.index()), Some(loc));
        }
        assert_eq!(Location::from_index(3), None);
    }

    #[test]
    fn dimension_ordering() {
        assert!(Dimension::False < Dimension::Point);
        assert!(Dimension::Point < Dimension::Line);
        assert!(Dimension::Line < Dimension::Area);
        assert_eq!(Dimension::Line.max(Dimension::Point), Dimension::Line);
    }

    #[test]
    fn dimension_symbols() {
        assert_eq!(Dimension::from_symbol('2'), Some(Dimension::Area));
        assert_eq!(Dimension::from_symbol('T'), None);
        assert_eq!(Dimension::False.to_string(), "F");
    }
}
