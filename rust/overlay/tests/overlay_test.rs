// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay properties and scenarios on whole geometries.

use approx::assert_relative_eq;
use geo_lite_core::{Coordinate, Dimension, Geometry, LineString, LinearRing, MultiPolygon, Point, Polygon};
use geo_lite_overlay::{
    difference, equals_topo, intersection, overlay_with_config, sym_difference, union, OpCode, OverlayConfig,
};

fn ring(pts: &[(f64, f64)]) -> LinearRing {
    LinearRing::try_from(pts.to_vec()).unwrap()
}

fn square(x0: f64, y0: f64, size: f64) -> Geometry {
    Polygon::new(
        ring(&[(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size), (x0, y0)]),
        vec![],
    )
    .into()
}

fn triangle(pts: [(f64, f64); 3]) -> Geometry {
    Polygon::new(ring(&[pts[0], pts[1], pts[2], pts[0]]), vec![]).into()
}

fn square_with_hole() -> Geometry {
    Polygon::new(
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        vec![ring(&[(3.0, 3.0), (3.0, 7.0), (7.0, 7.0), (7.0, 3.0), (3.0, 3.0)])],
    )
    .into()
}

fn line(pts: &[(f64, f64)]) -> Geometry {
    LineString::from(pts.to_vec()).into()
}

fn point(x: f64, y: f64) -> Geometry {
    Point::new(Coordinate::new(x, y)).into()
}

/// Pairs of areal inputs in general and special position.
fn area_pairs() -> Vec<(Geometry, Geometry)> {
    vec![
        (square(0.0, 0.0, 1.0), square(0.5, 0.5, 1.0)),
        (square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)),
        (square(0.0, 0.0, 4.0), square(1.0, 1.0, 2.0)),
        (square_with_hole(), square(5.0, 5.0, 10.0)),
        (
            triangle([(0.0, 0.0), (6.0, 0.0), (3.0, 6.0)]),
            triangle([(0.0, 4.0), (6.0, 4.0), (3.0, -2.0)]),
        ),
    ]
}

#[test]
fn unit_squares_scenario() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let inter = intersection(&a, &b).unwrap();
    assert_relative_eq!(inter.area(), 0.25, epsilon = 1e-12);
    assert!(equals_topo(&inter, &square(0.5, 0.5, 0.5)).unwrap());

    assert_relative_eq!(union(&a, &b).unwrap().area(), 1.75, epsilon = 1e-12);
    assert_relative_eq!(difference(&a, &b).unwrap().area(), 0.75, epsilon = 1e-12);
    assert_relative_eq!(sym_difference(&a, &b).unwrap().area(), 1.5, epsilon = 1e-12);
}

#[test]
fn union_is_commutative() {
    for (a, b) in area_pairs() {
        let ab = union(&a, &b).unwrap();
        let ba = union(&b, &a).unwrap();
        assert_relative_eq!(ab.area(), ba.area(), epsilon = 1e-9);
        assert_relative_eq!(ab.length(), ba.length(), epsilon = 1e-9);
    }
}

#[test]
fn self_intersection_is_identity() {
    for (a, _) in area_pairs() {
        let aa = intersection(&a, &a).unwrap();
        assert_relative_eq!(aa.area(), a.area(), epsilon = 1e-9);
        assert!(equals_topo(&aa, &a).unwrap());
    }
}

#[test]
fn intersection_and_difference_partition_the_first_input() {
    for (a, b) in area_pairs() {
        let inter = intersection(&a, &b).unwrap();
        let diff = difference(&a, &b).unwrap();
        assert_relative_eq!(inter.area() + diff.area(), a.area(), epsilon = 1e-9);
    }
}

#[test]
fn sym_difference_is_union_minus_intersection() {
    for (a, b) in area_pairs() {
        let sym = sym_difference(&a, &b).unwrap();
        let expected = difference(&union(&a, &b).unwrap(), &intersection(&a, &b).unwrap()).unwrap();
        assert_relative_eq!(sym.area(), expected.area(), epsilon = 1e-9);
        if !sym.is_empty() {
            assert!(equals_topo(&sym, &expected).unwrap());
        }
    }
}

#[test]
fn disjoint_triangles_scenario() {
    let a = triangle([(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
    let b = triangle([(5.0, 0.0), (7.0, 0.0), (6.0, 2.0)]);

    let Geometry::MultiPolygon(MultiPolygon(parts)) = union(&a, &b).unwrap() else {
        panic!("union of disjoint triangles is not a multi-polygon");
    };
    assert_eq!(parts.len(), 2);

    let inter = intersection(&a, &b).unwrap();
    assert!(matches!(&inter, Geometry::Polygon(p) if p.is_empty()));
}

#[test]
fn hole_is_cut_out_of_shell() {
    let result = difference(&square(0.0, 0.0, 10.0), &square(4.0, 4.0, 2.0)).unwrap();
    let Geometry::Polygon(poly) = &result else {
        panic!("expected a polygon, got {result:?}");
    };
    assert_eq!(poly.interiors.len(), 1);
    assert_relative_eq!(result.area(), 96.0, epsilon = 1e-12);
}

#[test]
fn union_fills_a_hole() {
    let result = union(&square_with_hole(), &square(3.0, 3.0, 4.0)).unwrap();
    let Geometry::Polygon(poly) = &result else {
        panic!("expected a polygon, got {result:?}");
    };
    assert!(poly.interiors.is_empty());
    assert_relative_eq!(result.area(), 100.0, epsilon = 1e-12);
}

#[test]
fn hole_touching_shell_vertex_is_noded() {
    let poly: Geometry = Polygon::new(
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        vec![ring(&[(10.0, 5.0), (6.0, 3.0), (6.0, 7.0), (10.0, 5.0)])],
    )
    .into();
    let config = OverlayConfig {
        validate_noding: true,
        envelope_filter: true,
        check_result: true,
        interrupt: None,
    };
    let result = overlay_with_config(&poly, &square(-5.0, -5.0, 20.0), OpCode::Intersection, &config).unwrap();
    let Geometry::Polygon(p) = &result else {
        panic!("expected a polygon, got {result:?}");
    };
    assert_eq!(p.interiors.len(), 1);
    assert_relative_eq!(result.area(), 92.0, epsilon = 1e-12);
}

#[test]
fn line_through_polygon_vertex_scenario() {
    let poly = square(0.0, 0.0, 10.0);
    let l = line(&[(-5.0, -5.0), (5.0, 5.0)]);
    let half = 50f64.sqrt();

    let inside = intersection(&l, &poly).unwrap();
    assert!(matches!(inside, Geometry::LineString(_)));
    assert_relative_eq!(inside.length(), half, epsilon = 1e-12);
    assert!(equals_topo(&inside, &line(&[(0.0, 0.0), (5.0, 5.0)])).unwrap());

    let outside = difference(&l, &poly).unwrap();
    assert_relative_eq!(outside.length(), half, epsilon = 1e-12);

    // the polygon swallows the inner half of the line
    let Geometry::GeometryCollection(parts) = union(&l, &poly).unwrap() else {
        panic!("union of a line and a polygon is not a collection");
    };
    assert_eq!(parts.0.len(), 2);
}

#[test]
fn crossing_lines() {
    let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
    let b = line(&[(0.0, 2.0), (2.0, 0.0)]);

    let Geometry::Point(p) = intersection(&a, &b).unwrap() else {
        panic!("crossing lines do not meet in a point");
    };
    let c = p.coord.unwrap();
    assert_relative_eq!(c.x, 1.0);
    assert_relative_eq!(c.y, 1.0);

    let Geometry::MultiLineString(lines) = union(&a, &b).unwrap() else {
        panic!("union of crossing lines is not a multi-line");
    };
    assert_eq!(lines.0.len(), 4);
}

#[test]
fn crossing_point_takes_interpolated_elevation() {
    let a: Geometry = LineString::new(vec![Coordinate::new_z(0.0, 0.0, 0.0), Coordinate::new_z(2.0, 2.0, 2.0)]).into();
    let b = line(&[(0.0, 2.0), (2.0, 0.0)]);
    let Geometry::Point(p) = intersection(&a, &b).unwrap() else {
        panic!("crossing lines do not meet in a point");
    };
    assert_relative_eq!(p.coord.and_then(|c| c.z).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn collinear_overlap_is_a_line() {
    let a = line(&[(0.0, 0.0), (4.0, 0.0)]);
    let b = line(&[(2.0, 0.0), (6.0, 0.0)]);
    let inter = intersection(&a, &b).unwrap();
    assert!(equals_topo(&inter, &line(&[(2.0, 0.0), (4.0, 0.0)])).unwrap());
    assert_relative_eq!(union(&a, &b).unwrap().length(), 6.0, epsilon = 1e-12);
}

#[test]
fn points_against_polygons() {
    let poly = square(0.0, 0.0, 2.0);
    assert_eq!(intersection(&point(1.0, 1.0), &poly).unwrap(), point(1.0, 1.0));
    assert!(matches!(union(&point(1.0, 1.0), &poly).unwrap(), Geometry::Polygon(_)));
    assert!(matches!(union(&point(5.0, 5.0), &poly).unwrap(), Geometry::GeometryCollection(_)));
    let diff = difference(&point(1.0, 1.0), &poly).unwrap();
    assert!(diff.is_empty());
    assert_eq!(diff.dimension(), Dimension::Point);
}

#[test]
fn empty_result_dimensions() {
    let poly = square(0.0, 0.0, 1.0);
    let far_line = line(&[(5.0, 5.0), (6.0, 6.0)]);
    let far_point = point(9.0, 9.0);

    let r = intersection(&poly, &far_line).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.dimension(), Dimension::Line);

    let r = intersection(&far_point, &poly).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.dimension(), Dimension::Point);

    let r = difference(&poly, &square(-1.0, -1.0, 3.0)).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.dimension(), Dimension::Area);
}

#[test]
fn result_check_accepts_valid_results() {
    let config = OverlayConfig {
        validate_noding: true,
        envelope_filter: false,
        check_result: true,
        interrupt: None,
    };
    for (a, b) in area_pairs() {
        for op in [OpCode::Intersection, OpCode::Difference] {
            overlay_with_config(&a, &b, op, &config).unwrap();
        }
    }
}
