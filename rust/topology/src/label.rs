// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology labels.
//!
//! A [`Label`] records, for each of the two input geometries, where a graph
//! component lies relative to that geometry. Components of a lineal input
//! only carry an `On` location; components of an areal input also carry the
//! locations to their left and right.

use std::fmt;

use geo_lite_core::Location;

use crate::position::Position;

/// Locations of one graph component relative to one input geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyLocation {
    locs: [Option<Location>; 3],
    area: bool,
}

impl TopologyLocation {
    /// A line location with only the `On` position.
    pub const fn line(on: Option<Location>) -> Self {
        Self {
            locs: [on, None, None],
            area: false,
        }
    }

    /// An area location with on, left and right positions.
    pub const fn area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            locs: [on, left, right],
            area: true,
        }
    }

    pub fn get(&self, pos: Position) -> Option<Location> {
        if !self.area && pos != Position::On {
            return None;
        }
        self.locs[pos.index()]
    }

    pub fn set(&mut self, pos: Position, loc: Option<Location>) {
        if !self.area && pos != Position::On {
            // a side location turns a line location into an area location
            self.area = true;
        }
        self.locs[pos.index()] = loc;
    }

    pub fn set_locations(&mut self, on: Option<Location>, left: Option<Location>, right: Option<Location>) {
        if self.area {
            self.locs = [on, left, right];
        } else {
            self.locs[0] = on;
        }
    }

    /// Sets every position that exists for this location.
    pub fn set_all(&mut self, loc: Option<Location>) {
        for slot in self.slots_mut() {
            *slot = loc;
        }
    }

    pub fn set_all_if_null(&mut self, loc: Option<Location>) {
        for slot in self.slots_mut() {
            if slot.is_none() {
                *slot = loc;
            }
        }
    }

    fn slots(&self) -> &[Option<Location>] {
        if self.area {
            &self.locs
        } else {
            &self.locs[..1]
        }
    }

    fn slots_mut(&mut self) -> &mut [Option<Location>] {
        if self.area {
            &mut self.locs
        } else {
            &mut self.locs[..1]
        }
    }

    /// No position has a location.
    pub fn is_null(&self) -> bool {
        self.slots().iter().all(Option::is_none)
    }

    pub fn is_any_null(&self) -> bool {
        self.slots().iter().any(Option::is_none)
    }

    pub fn is_area(&self) -> bool {
        self.area
    }

    pub fn is_line(&self) -> bool {
        !self.area
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.slots().iter().all(|l| *l == Some(loc))
    }

    /// Swaps left and right.
    pub fn flip(&mut self) {
        if self.area {
            self.locs.swap(Position::Left.index(), Position::Right.index());
        }
    }

    /// Fills unknown positions from `other`, widening to an area location
    /// if `other` is one.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.area && !self.area {
            self.area = true;
            self.locs[1] = None;
            self.locs[2] = None;
        }
        let n = if self.area { 3 } else { 1 };
        for i in 0..n {
            if self.locs[i].is_none() && (i == 0 || other.area) {
                self.locs[i] = other.locs[i];
            }
        }
    }
}

fn symbol(loc: Option<Location>) -> char {
    loc.map_or('-', Location::symbol)
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.area {
            write!(f, "{}", symbol(self.locs[1]))?;
        }
        write!(f, "{}", symbol(self.locs[0]))?;
        if self.area {
            write!(f, "{}", symbol(self.locs[2]))?;
        }
        Ok(())
    }
}

/// Locations of a graph component relative to both input geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// Line label with the same `On` location for both geometries.
    pub fn new_line(on: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::line(on), TopologyLocation::line(on)],
        }
    }

    /// Line label with a location for one geometry only.
    pub fn for_geometry(geom_index: usize, on: Location) -> Self {
        let mut label = Self::new_line(None);
        label.elt[geom_index].set(Position::On, Some(on));
        label
    }

    /// Area label with the same locations for both geometries.
    pub fn new_area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::area(on, left, right), TopologyLocation::area(on, left, right)],
        }
    }

    /// Area label with locations for one geometry; the other is an empty
    /// area location.
    pub fn for_geometry_area(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::new_area(None, None, None);
        label.elt[geom_index].set_locations(Some(on), Some(left), Some(right));
        label
    }

    /// Line label keeping only the `On` locations of `label`.
    pub fn to_line_label(label: &Label) -> Self {
        let mut line = Self::new_line(None);
        for i in 0..2 {
            line.set_location_on(i, label.location_on(i));
        }
        line
    }

    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    pub fn location(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.elt[geom_index].get(pos)
    }

    pub fn location_on(&self, geom_index: usize) -> Option<Location> {
        self.elt[geom_index].get(Position::On)
    }

    pub fn set_location(&mut self, geom_index: usize, pos: Position, loc: Option<Location>) {
        self.elt[geom_index].set(pos, loc);
    }

    pub fn set_location_on(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set(Position::On, loc);
    }

    pub fn set_all_locations(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all_if_null(loc);
    }

    /// Merges another label into this one. Known locations are kept.
    pub fn merge(&mut self, other: &Label) {
        for i in 0..2 {
            self.elt[i].merge(&other.elt[i]);
        }
    }

    /// Number of geometries this label has any location for.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|e| !e.is_null()).count()
    }

    pub fn is_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_null()
    }

    pub fn is_any_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_any_null()
    }

    /// `true` if either geometry's location is an area location.
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    pub fn is_area_of(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_area()
    }

    pub fn is_line(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos) && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom_index: usize, loc: Location) -> bool {
        self.elt[geom_index].all_positions_equal(loc)
    }

    /// Demotes an area location to a line location, keeping `On`.
    pub fn to_line(&mut self, geom_index: usize) {
        if self.elt[geom_index].is_area() {
            self.elt[geom_index] = TopologyLocation::line(self.elt[geom_index].get(Position::On));
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::{Boundary, Exterior, Interior};

    #[test]
    fn area_label_flip_swaps_sides() {
        let mut label = Label::for_geometry_area(0, Boundary, Exterior, Interior);
        label.flip();
        assert_eq!(label.location(0, Position::Left), Some(Interior));
        assert_eq!(label.location(0, Position::Right), Some(Exterior));
        assert_eq!(label.location_on(0), Some(Boundary));
        assert!(label.is_area_of(1));
        assert!(label.is_null(1));
    }

    #[test]
    fn merge_fills_unknown_only() {
        let mut a = Label::for_geometry(0, Interior);
        let b = Label::for_geometry_area(1, Boundary, Interior, Exterior);
        a.merge(&b);
        assert_eq!(a.location_on(0), Some(Interior));
        assert!(a.is_line(0));
        assert!(a.is_area_of(1));
        assert_eq!(a.location(1, Position::Right), Some(Exterior));
        assert_eq!(a.geometry_count(), 2);

        let mut c = Label::for_geometry(0, Exterior);
        c.merge(&Label::for_geometry(0, Interior));
        assert_eq!(c.location_on(0), Some(Exterior));
    }

    #[test]
    fn merging_area_into_line_widens() {
        let mut a = Label::for_geometry(0, Boundary);
        a.merge(&Label::for_geometry_area(0, Interior, Exterior, Interior));
        assert!(a.is_area_of(0));
        assert_eq!(a.location_on(0), Some(Boundary));
        assert_eq!(a.location(0, Position::Left), Some(Exterior));
    }

    #[test]
    fn to_line_drops_sides() {
        let mut label = Label::for_geometry_area(0, Boundary, Exterior, Interior);
        label.to_line(0);
        assert!(label.is_line(0));
        assert_eq!(label.location_on(0), Some(Boundary));
        assert_eq!(label.location(0, Position::Left), None);
    }

    #[test]
    fn set_all_if_null_respects_shape() {
        let mut label = Label::for_geometry_area(0, Boundary, Exterior, Interior);
        label.set_all_locations_if_null(1, Some(Exterior));
        assert!(label.all_positions_equal(1, Exterior));
        assert!(!label.is_any_null(0));

        let mut line = Label::new_line(None);
        line.set_all_locations_if_null(0, Some(Interior));
        assert!(line.is_line(0));
        assert_eq!(line.location_on(0), Some(Interior));
    }

    #[test]
    fn line_label_from_area_label() {
        let area = Label::for_geometry_area(1, Boundary, Interior, Exterior);
        let line = Label::to_line_label(&area);
        assert!(line.is_line(0) && line.is_line(1));
        assert_eq!(line.location_on(1), Some(Boundary));
        assert_eq!(line.to_string(), "A:- B:b");
    }
}
