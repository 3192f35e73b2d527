// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection matrices of whole geometries.

use geo_lite_core::{BoundaryNodeRule, Coordinate, Geometry, LineString, LinearRing, Point, Polygon};
use geo_lite_overlay::{relate, relate_pattern, relate_with_rule};

fn square(x0: f64, y0: f64, size: f64) -> Geometry {
    Polygon::new(
        LinearRing::try_from(vec![(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size), (x0, y0)])
            .unwrap(),
        vec![],
    )
    .into()
}

fn line(pts: &[(f64, f64)]) -> Geometry {
    LineString::from(pts.to_vec()).into()
}

fn point(x: f64, y: f64) -> Geometry {
    Point::new(Coordinate::new(x, y)).into()
}

fn im(a: &Geometry, b: &Geometry) -> String {
    relate(a, b).unwrap().to_string()
}

#[test]
fn overlapping_squares() {
    assert_eq!(im(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0)), "212101212");
}

#[test]
fn squares_sharing_an_edge() {
    assert_eq!(im(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)), "FF2F11212");
}

#[test]
fn nested_squares() {
    let outer = square(0.0, 0.0, 4.0);
    let inner = square(1.0, 1.0, 2.0);
    assert_eq!(im(&outer, &inner), "212FF1FF2");
    assert_eq!(im(&inner, &outer), "2FF1FF212");
}

#[test]
fn line_through_polygon_vertex() {
    let l = line(&[(-5.0, -5.0), (5.0, 5.0)]);
    assert_eq!(im(&l, &square(0.0, 0.0, 10.0)), "1010F0212");
}

#[test]
fn disjoint_envelopes() {
    assert_eq!(im(&point(20.0, 20.0), &square(0.0, 0.0, 1.0)), "FF0FFF212");
    assert_eq!(im(&line(&[(20.0, 20.0), (30.0, 30.0)]), &square(0.0, 0.0, 1.0)), "FF1FF0212");
}

#[test]
fn matrix_is_transposed_when_arguments_swap() {
    let a = line(&[(-5.0, 5.0), (15.0, 5.0)]);
    let b = square(0.0, 0.0, 10.0);
    assert_eq!(relate(&a, &b).unwrap().transpose(), relate(&b, &a).unwrap());
}

#[test]
fn patterns() {
    let outer = square(0.0, 0.0, 4.0);
    let inner = square(1.0, 1.0, 2.0);
    assert!(relate_pattern(&outer, &inner, "T*****FF*").unwrap());
    assert!(!relate_pattern(&inner, &outer, "T*****FF*").unwrap());
    assert!(relate_pattern(&point(2.0, 2.0), &outer, "0FFFFF212").unwrap());
    assert!(relate_pattern(&outer, &inner, "bogus").is_err());
}

#[test]
fn boundary_node_rule_decides_closed_line_endpoints() {
    let closed = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    let start = point(0.0, 0.0);
    let mod2 = relate_with_rule(&closed, &start, BoundaryNodeRule::Mod2).unwrap();
    assert_eq!(mod2.to_string(), "0F1FFFFF2");
    let endpoint = relate_with_rule(&closed, &start, BoundaryNodeRule::EndPoint).unwrap();
    assert_eq!(endpoint.to_string(), "FF10FFFF2");
}
