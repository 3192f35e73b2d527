// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The overlay operation over a labelled planar graph.
//!
//! Both inputs are noded against themselves and each other, split into
//! edges and merged into one graph. Every directed edge is labelled with the
//! location of its sides relative to both inputs, the edges selected by the
//! operation are marked, and the result is assembled from polygons, lines
//! and points in that order.

use geo_lite_core::{
    build_geometry, z_interpolate, BoundaryNodeRule, Coordinate, Dimension, Envelope, Geometry, LineIntersector,
    Location, PointLocator,
};
use geo_lite_topology::{
    check_noding, Edge, EdgeList, Error, GeometryGraph, NodeKey, PlanarGraph, Position, Result,
};
use tracing::debug;

use crate::config::OverlayConfig;
use crate::line_builder::LineBuilder;
use crate::op_code::{is_result_of_op, OpCode};
use crate::point_builder::PointBuilder;
use crate::polygon_builder::PolygonBuilder;

/// Computes one overlay of two geometries.
///
/// An instance owns every graph structure for the duration of the
/// computation and is consumed by [`OverlayOp::result_geometry`].
pub struct OverlayOp<'a> {
    args: [GeometryGraph<'a>; 2],
    graph: PlanarGraph,
    edge_list: EdgeList,
    locator: PointLocator,
    config: OverlayConfig,
}

impl<'a> OverlayOp<'a> {
    pub fn new(g0: &'a Geometry, g1: &'a Geometry, config: OverlayConfig) -> Result<Self> {
        let rule = BoundaryNodeRule::default();
        Ok(Self {
            args: [GeometryGraph::new(0, g0, rule)?, GeometryGraph::new(1, g1, rule)?],
            graph: PlanarGraph::new(),
            edge_list: EdgeList::new(),
            locator: PointLocator::new(rule),
            config,
        })
    }

    /// Runs the overlay and assembles the result geometry.
    pub fn result_geometry(mut self, op: OpCode) -> Result<Geometry> {
        let result = self.compute_overlay(op)?;
        if self.config.check_result {
            self.check_result(op, &result)?;
        }
        Ok(result)
    }

    fn compute_overlay(&mut self, op: OpCode) -> Result<Geometry> {
        let env = self.operation_envelope(op);
        let env = env.as_ref();

        self.copy_points(0, env);
        self.copy_points(1, env);

        self.args[0].compute_self_nodes(false, env);
        self.args[1].compute_self_nodes(false, env);
        let [a, b] = &mut self.args;
        a.compute_edge_intersections(b, true, env);
        self.check_interrupt()?;

        let mut split = self.args[0].compute_split_edges();
        split.extend(self.args[1].compute_split_edges());
        debug!(op = %op, split_edges = split.len(), "noded inputs");
        self.insert_unique_edges(split, env);

        let edges = self.labelled_edges();
        if self.config.validate_noding {
            check_noding(&edges, env)?;
        }
        self.graph.add_edges(edges);

        self.compute_labelling()?;
        self.label_incomplete_nodes();
        debug!(
            op = %op,
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            "labelled graph"
        );
        self.check_interrupt()?;

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        let mut poly_builder = PolygonBuilder::new();
        poly_builder.add(&mut self.graph)?;
        let polygons: Vec<Geometry> = poly_builder.polygons().into_iter().map(Geometry::from).collect();
        self.check_interrupt()?;

        let lines: Vec<Geometry> = LineBuilder::new(op, self.locator, &polygons)
            .build(&mut self.graph)
            .into_iter()
            .map(Geometry::from)
            .collect();
        self.check_interrupt()?;

        let mut covering = lines.clone();
        covering.extend(polygons.iter().cloned());
        let points = PointBuilder::new(op, self.locator, &covering).build(&mut self.graph);
        self.check_interrupt()?;

        let mut parts: Vec<Geometry> = points.into_iter().map(Geometry::from).collect();
        parts.extend(lines);
        parts.extend(polygons);
        if parts.is_empty() {
            let dim = op.result_dimension(self.args[0].geometry().dimension(), self.args[1].geometry().dimension());
            return Ok(Geometry::empty_of_dimension(dim));
        }
        Ok(build_geometry(parts))
    }

    /// Region outside of which no input part can affect the result.
    fn operation_envelope(&self, op: OpCode) -> Option<Envelope> {
        if !self.config.envelope_filter {
            return None;
        }
        let env0 = self.args[0].geometry().envelope();
        match op {
            OpCode::Intersection => Some(env0.intersection(&self.args[1].geometry().envelope())),
            OpCode::Difference => Some(env0),
            OpCode::Union | OpCode::SymDifference => None,
        }
    }

    fn check_interrupt(&self) -> Result<()> {
        match &self.config.interrupt {
            Some(interrupt) => interrupt.check(),
            None => Ok(()),
        }
    }

    /// Copies the nodes of an input graph, such as points and line
    /// endpoints, with their labels.
    fn copy_points(&mut self, arg_index: usize, env: Option<&Envelope>) {
        for (_, node) in self.args[arg_index].nodes.iter() {
            let coord = node.coordinate();
            if env.is_some_and(|e| !e.covers_coord(&coord)) {
                continue;
            }
            let key = self.graph.add_node(coord);
            self.graph.nodes[key].set_label(arg_index, node.label.location_on(arg_index));
        }
    }

    /// Adds split edges, merging each edge that duplicates an earlier one
    /// into it. The depth of a merged edge counts how often each side lies
    /// inside an area.
    fn insert_unique_edges(&mut self, edges: Vec<Edge>, env: Option<&Envelope>) {
        for edge in edges {
            if env.is_some_and(|e| !e.intersects(edge.envelope())) {
                continue;
            }
            let Some(i) = self.edge_list.find_equal_edge(&edge) else {
                self.edge_list.add(edge);
                continue;
            };
            let existing = self.edge_list.get_mut(i);
            let mut to_merge = edge.label;
            if !existing.is_pointwise_equal(&edge) {
                to_merge.flip();
            }
            if existing.depth.is_null() {
                let own = existing.label;
                existing.depth.add(&own);
            }
            existing.depth.add(&to_merge);
            existing.label.merge(&to_merge);
        }
    }

    /// Resolves merged edges from their depths, then replaces collapsed
    /// edges by their collapsed form.
    fn labelled_edges(&mut self) -> Vec<Edge> {
        for edge in self.edge_list.iter_mut() {
            compute_label_from_depth(edge);
        }
        std::mem::take(&mut self.edge_list)
            .into_edges()
            .into_iter()
            .map(|e| if e.is_collapsed() { e.collapsed_edge() } else { e })
            .collect()
    }

    fn compute_labelling(&mut self) -> Result<()> {
        let args = [self.args[0].geometry(), self.args[1].geometry()];
        let graph = &mut self.graph;
        let keys = graph.nodes.keys();
        for &key in &keys {
            let node = &mut graph.nodes[key];
            let coord = node.coordinate();
            node.star
                .compute_labelling(&mut graph.dir_edges, &graph.edges, coord, args)?;
        }
        for &key in &keys {
            graph.nodes[key].star.merge_sym_labels(&mut graph.dir_edges);
        }
        for &key in &keys {
            let node = &mut graph.nodes[key];
            let star_label = node.star.label;
            node.label.merge(&star_label);
        }
        Ok(())
    }

    /// Locates nodes known to only one input against the other one, then
    /// pushes every node label onto its incident edges.
    fn label_incomplete_nodes(&mut self) {
        for key in self.graph.nodes.keys() {
            if self.graph.nodes[key].is_isolated() {
                let target = if self.graph.nodes[key].label.is_null(0) { 0 } else { 1 };
                self.label_incomplete_node(key, target);
            }
            let node = &self.graph.nodes[key];
            node.star.update_labelling(&mut self.graph.dir_edges, &node.label);
        }
    }

    fn label_incomplete_node(&mut self, key: NodeKey, target: usize) {
        let geom = self.args[target].geometry();
        let node = &mut self.graph.nodes[key];
        let coord = node.coordinate();
        let loc = self.locator.locate(&coord, geom);
        node.set_label(target, Some(loc));
        if loc != Location::Exterior {
            node.add_z(elevation_on_linework(&coord, geom));
        }
    }

    /// Marks area edges whose right side lies in the result.
    fn find_result_area_edges(&mut self, op: OpCode) {
        for &key in &self.graph.edge_ends {
            let de = &mut self.graph.dir_edges[key];
            let label = de.label();
            if label.is_area()
                && !de.is_interior_area_edge()
                && is_result_of_op(label.location(0, Position::Right), label.location(1, Position::Right), op)
            {
                de.in_result = true;
            }
        }
    }

    /// Unmarks edge pairs selected in both directions. They would bound a
    /// zero-width sliver.
    fn cancel_duplicate_result_edges(&mut self) {
        for &key in &self.graph.edge_ends {
            let sym = self.graph.dir_edges[key].sym;
            if self.graph.dir_edges[key].in_result && self.graph.dir_edges[sym].in_result {
                self.graph.dir_edges[key].in_result = false;
                self.graph.dir_edges[sym].in_result = false;
            }
        }
    }

    /// Rejects area results the inputs cannot produce. Only overlays of two
    /// areas are checked.
    fn check_result(&self, op: OpCode, result: &Geometry) -> Result<()> {
        let (g0, g1) = (self.args[0].geometry(), self.args[1].geometry());
        if g0.dimension() != Dimension::Area || g1.dimension() != Dimension::Area {
            return Ok(());
        }
        let bound = match op {
            OpCode::Intersection => g0.area().min(g1.area()),
            OpCode::Difference => g0.area(),
            OpCode::Union | OpCode::SymDifference => return Ok(()),
        };
        let area = result.area();
        if area > bound + 1e-6 * bound.max(1.0) {
            return Err(Error::topology(
                format!("{op} result area {area} exceeds the input bound {bound}"),
                None,
            ));
        }
        if op == OpCode::Difference {
            // every vertex of A is either kept or removed by B
            let uncovered = g0.coordinates().into_iter().find(|v| {
                self.locator.locate(v, result) == Location::Exterior && self.locator.locate(v, g1) == Location::Exterior
            });
            if let Some(v) = uncovered {
                return Err(Error::topology(
                    format!("{op} result drops an input vertex outside the second input"),
                    Some(v),
                ));
            }
        }
        Ok(())
    }
}

fn compute_label_from_depth(edge: &mut Edge) {
    if edge.depth.is_null() {
        return;
    }
    edge.depth.normalize();
    for i in 0..2 {
        if edge.label.is_null(i) || !edge.label.is_area() || edge.depth.is_null_for(i) {
            continue;
        }
        // equal depths on both sides: the area collapsed to a line here
        if edge.depth.delta(i) == 0 {
            edge.label.to_line(i);
        } else {
            for pos in [Position::Left, Position::Right] {
                edge.label.set_location(i, pos, edge.depth.location(i, pos));
            }
        }
    }
}

/// Elevation interpolated along the first line or ring segment of `geom`
/// that `p` lies on. The z of `p` itself is ignored.
fn elevation_on_linework(p: &Coordinate, geom: &Geometry) -> Option<f64> {
    let mut li = LineIntersector::new();
    let mut on_line = |pts: &[Coordinate]| {
        pts.windows(2).find_map(|seg| {
            li.compute_point_intersection(p, &seg[0], &seg[1]);
            li.has_intersection().then(|| z_interpolate(p, &seg[0], &seg[1]))
        })
    };
    match geom {
        Geometry::LineString(ls) => on_line(&ls.coords),
        Geometry::LinearRing(lr) => on_line(lr.coords()),
        Geometry::Polygon(poly) => poly.rings().find_map(|r| on_line(r.coords())),
        Geometry::MultiLineString(mls) => mls.0.iter().find_map(|ls| on_line(&ls.coords)),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .flat_map(|poly| poly.rings())
            .find_map(|r| on_line(r.coords())),
        _ => None,
    }
    .flatten()
}
