// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directed edges: one traversal direction of an edge, paired with its
//! opposite through `sym`.

use geo_lite_core::{Coordinate, Location};

use crate::edge::Edge;
use crate::edge_end::EdgeEnd;
use crate::keys::{DirEdgeKey, EdgeKey, NodeKey, RingKey};
use crate::position::Position;

#[derive(Debug, Clone)]
pub struct DirectedEdge {
    /// Direction and directed label at the origin node.
    pub end: EdgeEnd,
    pub edge: EdgeKey,
    pub forward: bool,
    /// Origin node.
    pub node: NodeKey,
    pub sym: DirEdgeKey,
    /// Successor in a maximal edge ring.
    pub next: Option<DirEdgeKey>,
    /// Successor in a minimal edge ring.
    pub next_min: Option<DirEdgeKey>,
    pub edge_ring: Option<RingKey>,
    pub min_edge_ring: Option<RingKey>,
    pub in_result: bool,
    pub visited: bool,
}

impl DirectedEdge {
    /// Directed edge over `edge`; the label is flipped for the reverse
    /// direction. `node` and `sym` are filled in by the graph.
    pub fn new(edge_key: EdgeKey, edge: &Edge, forward: bool) -> Self {
        let n = edge.num_points();
        let (p0, p1) = if forward {
            (edge.coordinate(0), edge.coordinate(1))
        } else {
            (edge.coordinate(n - 1), edge.coordinate(n - 2))
        };
        let mut label = edge.label;
        if !forward {
            label.flip();
        }
        Self {
            end: EdgeEnd::new(p0, p1, label),
            edge: edge_key,
            forward,
            node: NodeKey::default(),
            sym: DirEdgeKey::default(),
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            in_result: false,
            visited: false,
        }
    }

    pub fn label(&self) -> &crate::label::Label {
        &self.end.label
    }

    pub fn label_mut(&mut self) -> &mut crate::label::Label {
        &mut self.end.label
    }

    pub fn coordinate(&self) -> Coordinate {
        self.end.coordinate()
    }

    /// A line edge that is not part of, or lies outside of, every area input.
    pub fn is_line_edge(&self) -> bool {
        let label = self.label();
        let is_line = label.is_line(0) || label.is_line(1);
        let exterior_if_area =
            |i: usize| !label.is_area_of(i) || label.all_positions_equal(i, Location::Exterior);
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// Both sides are in the interior of every input area. Such an edge
    /// adds nothing to an areal result.
    pub fn is_interior_area_edge(&self) -> bool {
        let label = self.label();
        (0..2).all(|i| {
            label.is_area_of(i)
                && label.location(i, Position::Left) == Some(Location::Interior)
                && label.location(i, Position::Right) == Some(Location::Interior)
        })
    }
}
