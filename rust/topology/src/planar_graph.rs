// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The combined planar graph built from noded, labelled edges.
//!
//! Edges, directed edges and nodes are stored in separate arenas. Fields are
//! public so builders can borrow the node map and the edge arenas at the
//! same time.

use geo_lite_core::Coordinate;

use crate::directed_edge::DirectedEdge;
use crate::directed_edge_star::{DirEdgeArena, DirectedEdgeStar, EdgeArena};
use crate::edge::Edge;
use crate::error::Result;
use crate::keys::{DirEdgeKey, NodeKey};
use crate::node::NodeMap;

#[derive(Debug, Default)]
pub struct PlanarGraph {
    pub edges: EdgeArena,
    pub dir_edges: DirEdgeArena,
    pub nodes: NodeMap<DirectedEdgeStar>,
    /// Every directed edge in insertion order.
    pub edge_ends: Vec<DirEdgeKey>,
}

impl PlanarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, coord: Coordinate) -> NodeKey {
        self.nodes.add_node(coord)
    }

    /// Adds edges with a directed edge for each direction, creating nodes at
    /// their endpoints as needed.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            let ek = self.edges.insert(edge);
            let fwd = self.dir_edges.insert(DirectedEdge::new(ek, &self.edges[ek], true));
            let rev = self.dir_edges.insert(DirectedEdge::new(ek, &self.edges[ek], false));
            self.dir_edges[fwd].sym = rev;
            self.dir_edges[rev].sym = fwd;
            self.add_edge_end(fwd);
            self.add_edge_end(rev);
        }
    }

    fn add_edge_end(&mut self, key: DirEdgeKey) {
        let node = self.nodes.add_node(self.dir_edges[key].coordinate());
        self.dir_edges[key].node = node;
        self.nodes[node].star.insert(key, &self.dir_edges);
        self.edge_ends.push(key);
    }

    /// Links the result edges around every node into maximal rings.
    pub fn link_result_directed_edges(&mut self) -> Result<()> {
        for key in self.nodes.keys() {
            let node = &self.nodes[key];
            node.star.link_result_directed_edges(&mut self.dir_edges, node.coordinate())?;
        }
        Ok(())
    }

    /// Marks both directions of an edge as visited.
    pub fn set_visited_edge(&mut self, key: DirEdgeKey, visited: bool) {
        let sym = self.dir_edges[key].sym;
        self.dir_edges[key].visited = visited;
        self.dir_edges[sym].visited = visited;
    }

    /// `true` if any edge incident on the node is already in the result.
    pub fn is_incident_edge_in_result(&self, node: NodeKey) -> bool {
        self.nodes[node]
            .star
            .edges()
            .iter()
            .any(|k| self.edges[self.dir_edges[*k].edge].is_in_result())
    }
}
