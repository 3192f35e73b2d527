// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Computes the intersection matrix of two geometries from their noded
//! graphs, without building a result geometry.

use geo_lite_core::{has_boundary, BoundaryNodeRule, Dimension, Geometry, IntersectionMatrix, Location, PointLocator};
use geo_lite_topology::edge::update_im;
use geo_lite_topology::{GeometryGraph, Label, NodeMap, Result, SegmentIntersector};
use tracing::debug;

use super::edge_end_bundle::EdgeEndBundleStar;
use super::edge_end_builder::compute_edge_ends;

pub struct RelateComputer<'a> {
    args: [GeometryGraph<'a>; 2],
    nodes: NodeMap<EdgeEndBundleStar>,
    /// Labels of edges meeting no edge of the other input.
    isolated_edges: Vec<Label>,
    locator: PointLocator,
    rule: BoundaryNodeRule,
}

impl<'a> RelateComputer<'a> {
    pub fn new(g0: &'a Geometry, g1: &'a Geometry, rule: BoundaryNodeRule) -> Result<Self> {
        Ok(Self {
            args: [GeometryGraph::new(0, g0, rule)?, GeometryGraph::new(1, g1, rule)?],
            nodes: NodeMap::new(),
            isolated_edges: Vec::new(),
            locator: PointLocator::new(rule),
            rule,
        })
    }

    pub fn compute_im(mut self) -> Result<IntersectionMatrix> {
        let mut im = IntersectionMatrix::new();
        im.set(Location::Exterior, Location::Exterior, Dimension::Area);

        let (g0, g1) = (self.args[0].geometry(), self.args[1].geometry());
        if !g0.envelope().intersects(&g1.envelope()) {
            self.compute_disjoint_im(&mut im);
            return Ok(im);
        }

        self.args[0].compute_self_nodes(false, None);
        self.args[1].compute_self_nodes(false, None);
        let [a, b] = &mut self.args;
        let si = a.compute_edge_intersections(b, false, None);

        self.compute_intersection_nodes(0);
        self.compute_intersection_nodes(1);
        self.copy_nodes_and_labels(0);
        self.copy_nodes_and_labels(1);
        self.label_isolated_nodes();
        self.compute_proper_intersection_im(&si, &mut im)?;

        for i in 0..2 {
            for end in compute_edge_ends(self.args[i].edges()) {
                let key = self.nodes.add_node(end.coordinate());
                self.nodes[key].star.insert(end);
            }
        }
        self.label_node_edges()?;
        self.label_isolated_edges(0, 1);
        self.label_isolated_edges(1, 0);
        debug!(
            nodes = self.nodes.len(),
            isolated_edges = self.isolated_edges.len(),
            "labelled relate graph"
        );

        self.update_im(&mut im);
        Ok(im)
    }

    /// Matrix of inputs whose envelopes do not meet: only the exterior
    /// entries of each input are set.
    fn compute_disjoint_im(&self, im: &mut IntersectionMatrix) {
        let ga = self.args[0].geometry();
        if !ga.is_empty() {
            im.set(Location::Interior, Location::Exterior, ga.dimension());
            im.set(Location::Boundary, Location::Exterior, self.boundary_dimension(ga));
        }
        let gb = self.args[1].geometry();
        if !gb.is_empty() {
            im.set(Location::Exterior, Location::Interior, gb.dimension());
            im.set(Location::Exterior, Location::Boundary, self.boundary_dimension(gb));
        }
    }

    fn boundary_dimension(&self, geom: &Geometry) -> Dimension {
        if !has_boundary(geom, self.rule) {
            return Dimension::False;
        }
        // under non-Mod-2 rules a closed line may still have a point boundary
        if geom.dimension() == Dimension::Line {
            return Dimension::Point;
        }
        geom.boundary_dimension()
    }

    /// Creates nodes where edges of one input are intersected. A boundary
    /// edge toggles the node between boundary and interior.
    fn compute_intersection_nodes(&mut self, arg_index: usize) {
        for edge in self.args[arg_index].edges() {
            let edge_loc = edge.label.location_on(arg_index);
            for ei in edge.ei_list.iter() {
                let key = self.nodes.add_node(ei.coord);
                let node = &mut self.nodes[key];
                if edge_loc == Some(Location::Boundary) {
                    node.set_label_boundary(arg_index);
                } else if node.label.is_null(arg_index) {
                    node.set_label(arg_index, Some(Location::Interior));
                }
            }
        }
    }

    fn copy_nodes_and_labels(&mut self, arg_index: usize) {
        for (_, node) in self.args[arg_index].nodes.iter() {
            let key = self.nodes.add_node(node.coordinate());
            self.nodes[key].set_label(arg_index, node.label.location_on(arg_index));
        }
    }

    /// Locates nodes known to only one input in the other.
    fn label_isolated_nodes(&mut self) {
        for key in self.nodes.keys() {
            let node = &mut self.nodes[key];
            if !node.is_isolated() {
                continue;
            }
            let target = if node.label.is_null(0) { 0 } else { 1 };
            let loc = self.locator.locate(&node.coordinate(), self.args[target].geometry());
            node.label.set_all_locations(target, Some(loc));
        }
    }

    /// A proper intersection fixes several entries at once, depending on
    /// the input dimensions.
    fn compute_proper_intersection_im(&self, si: &SegmentIntersector, im: &mut IntersectionMatrix) -> Result<()> {
        let dim_a = self.args[0].geometry().dimension();
        let dim_b = self.args[1].geometry().dimension();
        let has_proper = si.has_proper_intersection();
        let has_proper_interior = si.has_proper_interior_intersection();

        use Dimension::{Area, Line};
        match (dim_a, dim_b) {
            (Area, Area) => {
                if has_proper {
                    im.set_at_least_pattern("212101212")?;
                }
            }
            (Area, Line) => {
                if has_proper {
                    im.set_at_least_pattern("FFF0FFFF2")?;
                }
                if has_proper_interior {
                    im.set_at_least_pattern("1FFFFF1FF")?;
                }
            }
            (Line, Area) => {
                if has_proper {
                    im.set_at_least_pattern("F0FFFFFF2")?;
                }
                if has_proper_interior {
                    im.set_at_least_pattern("1F1FFFFFF")?;
                }
            }
            (Line, Line) => {
                if has_proper_interior {
                    im.set_at_least_pattern("0FFFFFFFF")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn label_node_edges(&mut self) -> Result<()> {
        let args = [self.args[0].geometry(), self.args[1].geometry()];
        for key in self.nodes.keys() {
            let node = &mut self.nodes[key];
            let coord = node.coordinate();
            node.star.compute_labelling(coord, args, self.rule)?;
        }
        Ok(())
    }

    /// Edges of one input meeting no edge of the other lie entirely in one
    /// location of it, found from any of their points.
    fn label_isolated_edges(&mut self, this_index: usize, target_index: usize) {
        let target = self.args[target_index].geometry();
        let locator = self.locator;
        for edge in self.args[this_index].edges_mut() {
            if !edge.is_isolated() {
                continue;
            }
            let loc = if target.dimension() > Dimension::Point {
                locator.locate(&edge.first_coordinate(), target)
            } else {
                Location::Exterior
            };
            edge.label.set_all_locations(target_index, Some(loc));
            self.isolated_edges.push(edge.label);
        }
    }

    fn update_im(&self, im: &mut IntersectionMatrix) {
        for label in &self.isolated_edges {
            update_im(label, im);
        }
        for (_, node) in self.nodes.iter() {
            node.update_im(im);
            node.star.update_im(im);
        }
    }
}
