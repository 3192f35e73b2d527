// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge ends at every intersection of an unsplit edge.

use geo_lite_topology::{Edge, EdgeEnd, EdgeIntersection};

/// Creates the edge ends of `edges` at each of their intersections and
/// endpoints, without splitting the edges.
pub fn compute_edge_ends(edges: &[Edge]) -> Vec<EdgeEnd> {
    let mut ends = Vec::new();
    for edge in edges {
        compute_edge_ends_for(edge, &mut ends);
    }
    ends
}

fn compute_edge_ends_for(edge: &Edge, ends: &mut Vec<EdgeEnd>) {
    let mut ei_list = edge.ei_list.clone();
    ei_list.add_endpoints(edge.coordinates());
    let list: Vec<EdgeIntersection> = ei_list.iter().copied().collect();

    for (i, curr) in list.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| &list[p]);
        let next = list.get(i + 1);
        if let Some(end) = end_for_prev(edge, curr, prev) {
            ends.push(end);
        }
        if let Some(end) = end_for_next(edge, curr, next) {
            ends.push(end);
        }
    }
}

/// The end pointing back along the edge from `curr`. Its label is flipped
/// since it runs against the edge direction.
fn end_for_prev(edge: &Edge, curr: &EdgeIntersection, prev: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let mut i_prev = curr.segment_index;
    if curr.dist == 0.0 {
        // at the start of the edge there is nothing behind
        i_prev = i_prev.checked_sub(1)?;
    }
    let p_prev = match prev {
        Some(prev) if prev.segment_index >= i_prev => prev.coord,
        _ => edge.coordinate(i_prev),
    };
    let mut label = edge.label;
    label.flip();
    Some(EdgeEnd::new(curr.coord, p_prev, label))
}

/// The end pointing forward along the edge from `curr`.
fn end_for_next(edge: &Edge, curr: &EdgeIntersection, next: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let i_next = curr.segment_index + 1;
    if i_next >= edge.num_points() && next.is_none() {
        return None;
    }
    let p_next = match next {
        Some(next) if next.segment_index == curr.segment_index => next.coord,
        _ => edge.coordinate(i_next),
    };
    Some(EdgeEnd::new(curr.coord, p_next, edge.label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::{Coordinate, Location};
    use geo_lite_topology::Label;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn unsplit_edge_has_two_ends() {
        let edge = Edge::new(vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)], Label::for_geometry(0, Location::Interior));
        let ends = compute_edge_ends(&[edge]);
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[0].coordinate(), c(0.0, 0.0));
        assert_eq!(ends[0].directed_coordinate(), c(1.0, 0.0));
        assert_eq!(ends[1].coordinate(), c(2.0, 0.0));
        assert_eq!(ends[1].directed_coordinate(), c(1.0, 0.0));
    }

    #[test]
    fn interior_intersection_adds_two_ends() {
        let mut edge = Edge::new(vec![c(0.0, 0.0), c(2.0, 0.0)], Label::for_geometry_area(0, Location::Boundary, Location::Interior, Location::Exterior));
        edge.ei_list.add(c(1.0, 0.0), 0, 1.0);
        let ends = compute_edge_ends(&[edge]);
        assert_eq!(ends.len(), 4);

        let at_mid: Vec<_> = ends.iter().filter(|e| e.coordinate() == c(1.0, 0.0)).collect();
        assert_eq!(at_mid.len(), 2);
        let backwards = at_mid.iter().find(|e| e.directed_coordinate() == c(0.0, 0.0)).unwrap();
        // flipped: the interior is now on the right
        assert_eq!(
            backwards.label.location(0, geo_lite_topology::Position::Right),
            Some(Location::Interior)
        );
    }
}
