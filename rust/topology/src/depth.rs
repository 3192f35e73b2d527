// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side depths of merged duplicate edges.
//!
//! When coincident edges are merged, each contributes its side locations as
//! depths (exterior 0, interior 1). After normalisation, equal depths on
//! both sides mean the area has collapsed to a line along the edge.

use geo_lite_core::Location;

use crate::label::Label;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Depth {
    depth: [[Option<i32>; 3]; 2],
}

fn depth_at_location(loc: Location) -> Option<i32> {
    match loc {
        Location::Exterior => Some(0),
        Location::Interior => Some(1),
        Location::Boundary => None,
    }
}

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, geom_index: usize, pos: Position) -> Option<i32> {
        self.depth[geom_index][pos.index()]
    }

    pub fn set(&mut self, geom_index: usize, pos: Position, depth: i32) {
        self.depth[geom_index][pos.index()] = Some(depth);
    }

    /// Location implied by a side depth: exterior at zero or below.
    pub fn location(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.get(geom_index, pos)
            .map(|d| if d <= 0 { Location::Exterior } else { Location::Interior })
    }

    pub fn is_null(&self) -> bool {
        self.depth.iter().all(|g| g.iter().all(Option::is_none))
    }

    pub fn is_null_for(&self, geom_index: usize) -> bool {
        self.depth[geom_index][Position::Left.index()].is_none()
    }

    /// Accumulates the side locations of a label.
    pub fn add(&mut self, label: &Label) {
        for i in 0..2 {
            for pos in [Position::Left, Position::Right] {
                let Some(loc) = label.location(i, pos) else {
                    continue;
                };
                let Some(d) = depth_at_location(loc) else {
                    continue;
                };
                let slot = &mut self.depth[i][pos.index()];
                *slot = Some(slot.map_or(d, |cur| cur + d));
            }
        }
    }

    /// Right depth minus left depth for one geometry.
    pub fn delta(&self, geom_index: usize) -> i32 {
        let left = self.depth[geom_index][Position::Left.index()].unwrap_or(0);
        let right = self.depth[geom_index][Position::Right.index()].unwrap_or(0);
        right - left
    }

    /// Reduces side depths to 0/1 relative to the shallower side.
    pub fn normalize(&mut self) {
        for i in 0..2 {
            if self.is_null_for(i) {
                continue;
            }
            let left = self.depth[i][Position::Left.index()].unwrap_or(0);
            let right = self.depth[i][Position::Right.index()].unwrap_or(0);
            let min_depth = left.min(right).max(0);
            for pos in [Position::Left, Position::Right] {
                let d = self.depth[i][pos.index()].unwrap_or(0);
                self.depth[i][pos.index()] = Some(if d > min_depth { 1 } else { 0 });
            }
        }
    }
}
