// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph nodes and the coordinate-ordered node map.
//!
//! A node is generic over the star of edge ends it owns: geometry graphs use
//! `()`, the overlay graph a directed-edge star, relate a star of edge-end
//! bundles.

use std::collections::BTreeMap;

use geo_lite_core::{CoordKey, Coordinate, Dimension, IntersectionMatrix, Location};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::keys::NodeKey;
use crate::label::Label;

#[derive(Debug, Clone)]
pub struct Node<S> {
    coord: Coordinate,
    pub label: Label,
    pub star: S,
    pub in_result: bool,
    z_values: SmallVec<[f64; 2]>,
}

impl<S: Default> Node<S> {
    pub fn new(coord: Coordinate) -> Self {
        let mut node = Self {
            coord: coord.with_z(None),
            label: Label::default(),
            star: S::default(),
            in_result: false,
            z_values: SmallVec::new(),
        };
        node.add_z(coord.z);
        node
    }
}

impl<S> Node<S> {
    /// Node position; z is the mean of the distinct elevations seen here.
    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }

    /// Records an elevation sample. Repeated values count once.
    pub fn add_z(&mut self, z: Option<f64>) {
        let Some(z) = z.filter(|z| !z.is_nan()) else {
            return;
        };
        if self.z_values.contains(&z) {
            return;
        }
        self.z_values.push(z);
        let total: f64 = self.z_values.iter().sum();
        self.coord.z = Some(total / self.z_values.len() as f64);
    }

    /// Present in exactly one input geometry.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn set_label(&mut self, geom_index: usize, on: Option<Location>) {
        self.label.set_location_on(geom_index, on);
    }

    /// Toggles the boundary status of a node for one geometry, as when
    /// counting line endpoints under the Mod-2 rule.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let new_loc = match self.label.location_on(geom_index) {
            Some(Location::Boundary) => Location::Interior,
            Some(Location::Interior) => Location::Boundary,
            _ => Location::Boundary,
        };
        self.label.set_location_on(geom_index, Some(new_loc));
    }

    /// Adds the point intersection of the two geometries at this node.
    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(self.label.location_on(0), self.label.location_on(1), Dimension::Point);
    }
}

/// Nodes keyed by planar position, iterated in coordinate order.
#[derive(Debug, Clone)]
pub struct NodeMap<S> {
    nodes: SlotMap<NodeKey, Node<S>>,
    index: BTreeMap<CoordKey, NodeKey>,
}

impl<S> Default for NodeMap<S> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            index: BTreeMap::new(),
        }
    }
}

impl<S: Default> NodeMap<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds or creates the node at `coord`, recording its elevation.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeKey {
        if let Some(&key) = self.index.get(&coord.key()) {
            self.nodes[key].add_z(coord.z);
            return key;
        }
        let key = self.nodes.insert(Node::new(coord));
        self.index.insert(coord.key(), key);
        key
    }
}

impl<S> NodeMap<S> {
    pub fn find(&self, coord: &Coordinate) -> Option<NodeKey> {
        self.index.get(&coord.key()).copied()
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node<S>> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<S>> {
        self.nodes.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node keys in coordinate order.
    pub fn keys(&self) -> Vec<NodeKey> {
        self.index.values().copied().collect()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node<S>)> {
        self.index.values().map(move |&k| (k, &self.nodes[k]))
    }

    /// Coordinates of the nodes on the boundary of geometry `geom_index`.
    pub fn boundary_nodes(&self, geom_index: usize) -> Vec<Coordinate> {
        self.iter()
            .filter(|(_, n)| n.label.location_on(geom_index) == Some(Location::Boundary))
            .map(|(_, n)| n.coordinate())
            .collect()
    }
}

impl<S> std::ops::Index<NodeKey> for NodeMap<S> {
    type Output = Node<S>;

    fn index(&self, key: NodeKey) -> &Node<S> {
        &self.nodes[key]
    }
}

impl<S> std::ops::IndexMut<NodeKey> for NodeMap<S> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<S> {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nodes_are_unique_per_position() {
        let mut map: NodeMap<()> = NodeMap::new();
        let a = map.add_node(Coordinate::new(1.0, 2.0));
        let b = map.add_node(Coordinate::new(1.0, 2.0));
        let c = map.add_node(Coordinate::new(0.0, 5.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(map.len(), 2);
        let order: Vec<_> = map.iter().map(|(_, n)| n.coordinate()).collect();
        assert_eq!(order, vec![Coordinate::new(0.0, 5.0), Coordinate::new(1.0, 2.0)]);
    }

    #[test]
    fn z_is_averaged_over_distinct_values() {
        let mut map: NodeMap<()> = NodeMap::new();
        let k = map.add_node(Coordinate::new_z(0.0, 0.0, 10.0));
        map.add_node(Coordinate::new_z(0.0, 0.0, 20.0));
        map.add_node(Coordinate::new_z(0.0, 0.0, 20.0));
        map.add_node(Coordinate::new(0.0, 0.0));
        assert_relative_eq!(map[k].coordinate().z.unwrap(), 15.0);
    }

    #[test]
    fn boundary_toggles() {
        let mut node: Node<()> = Node::new(Coordinate::new(0.0, 0.0));
        node.set_label_boundary(0);
        assert_eq!(node.label.location_on(0), Some(Location::Boundary));
        node.set_label_boundary(0);
        assert_eq!(node.label.location_on(0), Some(Location::Interior));
    }
}
