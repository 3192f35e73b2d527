// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection points recorded along an edge, kept in edge order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use geo_lite_core::Coordinate;

use crate::edge::Edge;
use crate::label::Label;

/// A point where an edge is intersected, located by segment and by distance
/// along that segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    pub coord: Coordinate,
    pub segment_index: usize,
    pub dist: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct IntersectionKey {
    segment_index: usize,
    dist: f64,
}

impl Eq for IntersectionKey {}

impl PartialOrd for IntersectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntersectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| self.dist.total_cmp(&other.dist))
    }
}

/// Ordered set of the intersections of one edge. Duplicates (same segment
/// and distance) are stored once.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList {
    nodes: BTreeMap<IntersectionKey, EdgeIntersection>,
}

impl EdgeIntersectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection unless one already exists at the same position.
    pub fn add(&mut self, coord: Coordinate, segment_index: usize, dist: f64) {
        let key = IntersectionKey {
            segment_index,
            dist: dist + 0.0,
        };
        self.nodes.entry(key).or_insert(EdgeIntersection {
            coord,
            segment_index,
            dist,
        });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.nodes.values()
    }

    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.iter().any(|ei| ei.coord.equals_2d(pt))
    }

    /// Ensures both edge endpoints are present.
    pub fn add_endpoints(&mut self, pts: &[Coordinate]) {
        if pts.is_empty() {
            return;
        }
        let max_seg = pts.len() - 1;
        self.add(pts[0], 0, 0.0);
        self.add(pts[max_seg], max_seg, 0.0);
    }

    /// Splits the parent edge at every intersection, endpoints included.
    pub fn split_edges(&mut self, pts: &[Coordinate], label: &Label) -> Vec<Edge> {
        self.add_endpoints(pts);
        let list: Vec<EdgeIntersection> = self.nodes.values().copied().collect();
        list.windows(2)
            .map(|w| create_split_edge(pts, label, &w[0], &w[1]))
            .collect()
    }
}

/// The sub-edge between two consecutive intersections.
///
/// The end intersection is dropped when it coincides with the start vertex
/// of its segment, which is then already the last point.
fn create_split_edge(pts: &[Coordinate], label: &Label, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Edge {
    let last_seg_start = pts[ei1.segment_index];
    let use_int_pt1 = ei1.dist > 0.0 || !ei1.coord.equals_2d(&last_seg_start);

    let mut split = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
    split.push(ei0.coord);
    split.extend_from_slice(&pts[ei0.segment_index + 1..=ei1.segment_index]);
    if use_int_pt1 {
        split.push(ei1.coord);
    }
    Edge::new(split, *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::Location;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn duplicates_are_ignored_and_order_is_along_edge() {
        let mut list = EdgeIntersectionList::new();
        list.add(c(7.0, 0.0), 1, 2.0);
        list.add(c(2.0, 0.0), 0, 2.0);
        list.add(c(2.0, 0.0), 0, 2.0);
        list.add(c(6.0, 0.0), 1, 1.0);
        let segs: Vec<_> = list.iter().map(|ei| (ei.segment_index, ei.dist)).collect();
        assert_eq!(segs, vec![(0, 2.0), (1, 1.0), (1, 2.0)]);
    }

    #[test]
    fn split_at_interior_points() {
        let pts = vec![c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)];
        let mut list = EdgeIntersectionList::new();
        list.add(c(2.0, 0.0), 0, 2.0);
        list.add(c(5.0, 0.0), 1, 0.0);
        let edges = list.split_edges(&pts, &Label::for_geometry(0, Location::Interior));
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].coordinates(), &[c(0.0, 0.0), c(2.0, 0.0)]);
        assert_eq!(edges[1].coordinates(), &[c(2.0, 0.0), c(5.0, 0.0)]);
        assert_eq!(edges[2].coordinates(), &[c(5.0, 0.0), c(10.0, 0.0)]);
    }

    #[test]
    fn unsplit_edge_is_copied() {
        let pts = vec![c(0.0, 0.0), c(5.0, 5.0), c(10.0, 0.0)];
        let mut list = EdgeIntersectionList::new();
        let edges = list.split_edges(&pts, &Label::default());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].coordinates(), pts.as_slice());
    }
}
