// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Noding and graph construction across whole geometries.

use geo_lite_core::{BoundaryNodeRule, Coordinate, Geometry, LineString, Location, Polygon};
use geo_lite_topology::{check_noding, GeometryGraph, PlanarGraph};

fn square(x0: f64, y0: f64, size: f64) -> Geometry {
    Polygon::new(
        vec![(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size), (x0, y0)]
            .try_into()
            .unwrap(),
        vec![],
    )
    .into()
}

#[test]
fn figure_eight_is_noded_at_its_crossing() {
    let g: Geometry = LineString::from(vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]).into();
    let mut graph = GeometryGraph::new(0, &g, BoundaryNodeRule::default()).unwrap();
    let si = graph.compute_self_nodes(false, None);
    assert!(si.has_proper_intersection());

    let crossing = Coordinate::new(1.0, 1.0);
    let node = graph.nodes.find(&crossing).unwrap();
    assert_eq!(graph.nodes[node].label.location_on(0), Some(Location::Interior));

    let split = graph.compute_split_edges();
    assert_eq!(split.len(), 3);
    check_noding(&split, None).unwrap();

    let mut planar = PlanarGraph::new();
    planar.add_edges(split);
    let node = planar.nodes.find(&crossing).unwrap();
    assert_eq!(planar.nodes[node].star.degree(), 4);
    let start = planar.nodes.find(&Coordinate::new(0.0, 0.0)).unwrap();
    assert_eq!(planar.nodes[start].star.degree(), 2);
}

#[test]
fn closed_line_has_no_boundary() {
    let g: Geometry = LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).into();
    let graph = GeometryGraph::new(0, &g, BoundaryNodeRule::Mod2).unwrap();
    assert!(graph.boundary_nodes().is_empty());

    let graph = GeometryGraph::new(0, &g, BoundaryNodeRule::EndPoint).unwrap();
    assert_eq!(graph.boundary_nodes(), vec![Coordinate::new(0.0, 0.0)]);
}

#[test]
fn overlapping_squares_split_into_noded_edges() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    let mut ga = GeometryGraph::new(0, &a, BoundaryNodeRule::default()).unwrap();
    let mut gb = GeometryGraph::new(1, &b, BoundaryNodeRule::default()).unwrap();
    ga.compute_self_nodes(false, None);
    gb.compute_self_nodes(false, None);
    let si = ga.compute_edge_intersections(&mut gb, true, None);
    assert!(si.has_proper_interior_intersection());

    let mut edges = ga.compute_split_edges();
    edges.extend(gb.compute_split_edges());
    // each ring is cut at its start node and at the two crossings
    assert_eq!(edges.len(), 6);
    check_noding(&edges, None).unwrap();
    assert!(edges.iter().all(|e| e.label.is_area()));
}

#[test]
fn unsplit_input_fails_validation() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    let ga = GeometryGraph::new(0, &a, BoundaryNodeRule::default()).unwrap();
    let gb = GeometryGraph::new(1, &b, BoundaryNodeRule::default()).unwrap();
    let mut edges = ga.edges().to_vec();
    edges.extend_from_slice(gb.edges());
    let err = check_noding(&edges, None).unwrap_err();
    assert!(err.is_topology());
}

#[test]
fn envelope_filter_limits_cross_noding() {
    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);
    let mut ga = GeometryGraph::new(0, &a, BoundaryNodeRule::default()).unwrap();
    let mut gb = GeometryGraph::new(1, &b, BoundaryNodeRule::default()).unwrap();
    let far = geo_lite_core::Envelope::new(Coordinate::new(100.0, 100.0), Coordinate::new(101.0, 101.0));
    let si = ga.compute_edge_intersections(&mut gb, true, Some(&far));
    assert!(!si.has_intersection());
    assert_eq!(ga.compute_split_edges().len(), 1);
}
