// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collects the point components of an overlay result.

use geo_lite_core::{Geometry, Location, Point, PointLocator};
use geo_lite_topology::PlanarGraph;
use tracing::debug;

use crate::op_code::{is_label_result_of_op, OpCode};

/// Emits result nodes not already covered by result lines or areas.
pub struct PointBuilder<'a> {
    op: OpCode,
    locator: PointLocator,
    /// Result lines and polygons built before the points.
    covering: &'a [Geometry],
}

impl<'a> PointBuilder<'a> {
    pub fn new(op: OpCode, locator: PointLocator, covering: &'a [Geometry]) -> Self {
        Self { op, locator, covering }
    }

    pub fn build(&self, graph: &mut PlanarGraph) -> Vec<Point> {
        let mut points = Vec::new();
        for key in graph.nodes.keys() {
            if graph.nodes[key].in_result || graph.is_incident_edge_in_result(key) {
                continue;
            }
            let node = &mut graph.nodes[key];
            // nodes with edges only produce points where the inputs touch
            if node.star.degree() > 0 && self.op != OpCode::Intersection {
                continue;
            }
            if !is_label_result_of_op(&node.label, self.op) {
                continue;
            }
            let coord = node.coordinate();
            let covered = self
                .covering
                .iter()
                .any(|g| self.locator.locate(&coord, g) != Location::Exterior);
            if !covered {
                node.in_result = true;
                points.push(Point::new(coord));
            }
        }
        debug!(op = %self.op, points = points.len(), "built result points");
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::Coordinate;
    use geo_lite_core::LineString;
    use geo_lite_core::Location::{Exterior, Interior};

    fn graph_with_point(loc0: Location, loc1: Location) -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let key = graph.add_node(Coordinate::new_z(1.0, 1.0, 5.0));
        graph.nodes[key].set_label(0, Some(loc0));
        graph.nodes[key].set_label(1, Some(loc1));
        graph
    }

    #[test]
    fn isolated_node_follows_the_operation() {
        let mut graph = graph_with_point(Interior, Exterior);
        let pts = PointBuilder::new(OpCode::Union, PointLocator::default(), &[]).build(&mut graph);
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].coord.and_then(|c| c.z), Some(5.0));

        let mut graph = graph_with_point(Interior, Exterior);
        let pts = PointBuilder::new(OpCode::Intersection, PointLocator::default(), &[]).build(&mut graph);
        assert!(pts.is_empty());
    }

    #[test]
    fn point_on_result_line_is_dropped() {
        let mut graph = graph_with_point(Interior, Interior);
        let line: Geometry = LineString::from(vec![(0.0, 0.0), (2.0, 2.0)]).into();
        let pts = PointBuilder::new(OpCode::Union, PointLocator::default(), &[line]).build(&mut graph);
        assert!(pts.is_empty());
    }
}
