// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collects the linear components of an overlay result.

use geo_lite_core::{Coordinate, Geometry, LineString, Location, PointLocator};
use geo_lite_topology::{DirEdgeKey, EdgeKey, PlanarGraph};
use tracing::debug;

use crate::op_code::{is_label_result_of_op, OpCode};

/// Builds result lines from graph edges that are not part of a result area.
pub struct LineBuilder<'a> {
    op: OpCode,
    locator: PointLocator,
    /// Result polygons built before the lines.
    polygons: &'a [Geometry],
}

impl<'a> LineBuilder<'a> {
    pub fn new(op: OpCode, locator: PointLocator, polygons: &'a [Geometry]) -> Self {
        Self { op, locator, polygons }
    }

    pub fn build(&self, graph: &mut PlanarGraph) -> Vec<LineString> {
        self.find_covered_line_edges(graph);

        let mut line_edges: Vec<EdgeKey> = Vec::new();
        for i in 0..graph.edge_ends.len() {
            let key = graph.edge_ends[i];
            if let Some(edge) = self.collect_line_edge(graph, key) {
                line_edges.push(edge);
            }
            if let Some(edge) = self.collect_boundary_touch_edge(graph, key) {
                line_edges.push(edge);
            }
        }

        let lines: Vec<LineString> = line_edges
            .into_iter()
            .map(|ek| {
                let edge = &mut graph.edges[ek];
                edge.set_in_result(true);
                LineString::new(edge.coordinates().to_vec())
            })
            .collect();
        debug!(op = %self.op, lines = lines.len(), "built result lines");
        lines
    }

    /// Decides for every line edge whether it runs inside a result area.
    /// Edges at nodes with incident area edges are settled from the star;
    /// the rest are located against the result polygons.
    fn find_covered_line_edges(&self, graph: &mut PlanarGraph) {
        for key in graph.nodes.keys() {
            graph.nodes[key]
                .star
                .find_covered_line_edges(&graph.dir_edges, &mut graph.edges);
        }

        for &key in &graph.edge_ends {
            let de = &graph.dir_edges[key];
            let edge = &mut graph.edges[de.edge];
            if de.is_line_edge() && !edge.is_covered_set() {
                edge.set_covered(self.is_covered(&de.coordinate()));
            }
        }
    }

    fn is_covered(&self, p: &Coordinate) -> bool {
        self.polygons
            .iter()
            .any(|poly| self.locator.locate(p, poly) != Location::Exterior)
    }

    fn collect_line_edge(&self, graph: &mut PlanarGraph, key: DirEdgeKey) -> Option<EdgeKey> {
        let de = &graph.dir_edges[key];
        if !de.is_line_edge() || de.visited {
            return None;
        }
        let edge = de.edge;
        if !is_label_result_of_op(de.label(), self.op) || graph.edges[edge].is_covered() {
            return None;
        }
        graph.set_visited_edge(key, true);
        Some(edge)
    }

    /// An area edge can still end up in an intersection result as a line,
    /// where the two inputs only touch along it.
    fn collect_boundary_touch_edge(&self, graph: &mut PlanarGraph, key: DirEdgeKey) -> Option<EdgeKey> {
        if self.op != OpCode::Intersection {
            return None;
        }
        let de = &graph.dir_edges[key];
        if de.is_line_edge() || de.visited || de.is_interior_area_edge() {
            return None;
        }
        let edge = de.edge;
        if graph.edges[edge].is_in_result() || !is_label_result_of_op(de.label(), self.op) {
            return None;
        }
        graph.set_visited_edge(key, true);
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::Location::{Exterior, Interior};
    use geo_lite_core::Polygon;
    use geo_lite_topology::{Edge, Label};

    fn line_graph(loc1: Location) -> PlanarGraph {
        let mut label = Label::for_geometry(0, Interior);
        label.set_location_on(1, Some(loc1));
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![Edge::new(
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)],
            label,
        )]);
        graph
    }

    fn big_square() -> Geometry {
        Polygon::new(
            vec![(-1.0, -1.0), (11.0, -1.0), (11.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)]
                .try_into()
                .unwrap(),
            vec![],
        )
        .into()
    }

    #[test]
    fn line_outside_other_input_is_kept_once() {
        let mut graph = line_graph(Exterior);
        let lines = LineBuilder::new(OpCode::Difference, PointLocator::default(), &[]).build(&mut graph);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].coords.len(), 2);
        assert!(graph.edges.values().all(Edge::is_in_result));
    }

    #[test]
    fn line_inside_other_input_is_dropped_from_difference() {
        let mut graph = line_graph(Interior);
        let lines = LineBuilder::new(OpCode::Difference, PointLocator::default(), &[]).build(&mut graph);
        assert!(lines.is_empty());
    }

    #[test]
    fn line_covered_by_result_area_is_dropped() {
        let mut graph = line_graph(Exterior);
        let polys = [big_square()];
        let lines = LineBuilder::new(OpCode::Union, PointLocator::default(), &polys).build(&mut graph);
        assert!(lines.is_empty());
        assert!(graph.edges.values().all(Edge::is_covered));
    }
}
