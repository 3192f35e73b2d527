// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph edges and the duplicate-aware edge list.

use geo_lite_core::{CoordKey, Coordinate, Dimension, Envelope, IntersectionMatrix, LineIntersector};
use rustc_hash::FxHashMap;

use crate::depth::Depth;
use crate::edge_intersection::EdgeIntersectionList;
use crate::label::Label;
use crate::position::Position;

/// A noded linear piece of an input geometry.
#[derive(Debug, Clone)]
pub struct Edge {
    pts: Vec<Coordinate>,
    env: Envelope,
    pub label: Label,
    pub depth: Depth,
    isolated: bool,
    in_result: bool,
    covered: bool,
    covered_set: bool,
    pub ei_list: EdgeIntersectionList,
}

impl Edge {
    pub fn new(pts: Vec<Coordinate>, label: Label) -> Self {
        let env = Envelope::from_coords(&pts);
        Self {
            pts,
            env,
            label,
            depth: Depth::new(),
            isolated: true,
            in_result: false,
            covered: false,
            covered_set: false,
            ei_list: EdgeIntersectionList::new(),
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.pts
    }

    pub fn coordinate(&self, i: usize) -> Coordinate {
        self.pts[i]
    }

    /// First vertex; used as a representative point.
    pub fn first_coordinate(&self) -> Coordinate {
        self.pts[0]
    }

    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn is_closed(&self) -> bool {
        self.pts[0].equals_2d(&self.pts[self.pts.len() - 1])
    }

    /// An area edge that doubles back on itself (`a b a`).
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.pts.len() == 3 && self.pts[0].equals_2d(&self.pts[2])
    }

    /// The line edge replacing a collapsed area edge.
    pub fn collapsed_edge(&self) -> Edge {
        Edge::new(vec![self.pts[0], self.pts[1]], Label::to_line_label(&self.label))
    }

    /// An edge is isolated while no intersection with the other geometry has
    /// been found.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub fn is_covered_set(&self) -> bool {
        self.covered_set
    }

    pub fn set_covered(&mut self, covered: bool) {
        self.covered = covered;
        self.covered_set = true;
    }

    /// Records every intersection currently held by `li` on segment
    /// `segment_index`, as input line `geom_index` of the intersector.
    pub fn add_intersections(&mut self, li: &LineIntersector, segment_index: usize, geom_index: usize) {
        for i in 0..li.intersection_num() {
            self.add_intersection(li, segment_index, geom_index, i);
        }
    }

    pub fn add_intersection(&mut self, li: &LineIntersector, segment_index: usize, geom_index: usize, int_index: usize) {
        let (seg, dist, pt) = self.normalized_intersection(li, segment_index, geom_index, int_index);
        self.ei_list.add(pt, seg, dist);
    }

    /// Segment index and distance for an intersection. A point equal to the
    /// end of its segment is attributed to the start of the next one.
    pub fn normalized_intersection(
        &self,
        li: &LineIntersector,
        segment_index: usize,
        geom_index: usize,
        int_index: usize,
    ) -> (usize, f64, Coordinate) {
        let int_pt = li.intersection(int_index);
        let mut seg = segment_index;
        let mut dist = li.edge_distance(geom_index, int_index);
        let next = seg + 1;
        if next < self.pts.len() && int_pt.equals_2d(&self.pts[next]) {
            seg = next;
            dist = 0.0;
        }
        (seg, dist, int_pt)
    }

    /// Splits this edge at its recorded intersections.
    pub fn split_edges(&mut self) -> Vec<Edge> {
        self.ei_list.split_edges(&self.pts, &self.label)
    }

    /// Same vertices in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.pts.len() == other.pts.len() && self.pts.iter().zip(&other.pts).all(|(a, b)| a.equals_2d(b))
    }
}

/// Contributes an edge label to an intersection matrix.
pub fn update_im(label: &Label, im: &mut IntersectionMatrix) {
    im.set_at_least_if_valid(label.location_on(0), label.location_on(1), Dimension::Line);
    if label.is_area() {
        for pos in [Position::Left, Position::Right] {
            im.set_at_least_if_valid(label.location(0, pos), label.location(1, pos), Dimension::Area);
        }
    }
}

/// Orientation-independent key of an edge's vertex sequence.
///
/// The sequence is read in whichever direction is lexicographically smaller
/// at the first differing vertex pair, so an edge and its reverse share a
/// key.
fn oriented_key(pts: &[Coordinate]) -> Vec<CoordKey> {
    let n = pts.len();
    let mut forward = true;
    for i in 0..n / 2 {
        let j = n - 1 - i;
        match pts[i].compare(&pts[j]) {
            std::cmp::Ordering::Less => break,
            std::cmp::Ordering::Greater => {
                forward = false;
                break;
            }
            std::cmp::Ordering::Equal => {}
        }
    }
    if forward {
        pts.iter().map(Coordinate::key).collect()
    } else {
        pts.iter().rev().map(Coordinate::key).collect()
    }
}

/// Edges in insertion order with an index for finding coincident edges.
#[derive(Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    index: FxHashMap<Vec<CoordKey>, usize>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, edge: Edge) {
        self.index.insert(oriented_key(edge.coordinates()), self.edges.len());
        self.edges.push(edge);
    }

    /// Index of an edge with the same vertices in either direction.
    pub fn find_equal_edge(&self, edge: &Edge) -> Option<usize> {
        self.index.get(&oriented_key(edge.coordinates())).copied()
    }

    pub fn get(&self, i: usize) -> &Edge {
        &self.edges[i]
    }

    pub fn get_mut(&mut self, i: usize) -> &mut Edge {
        &mut self.edges[i]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Edge> {
        self.edges.iter_mut()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Releases the edges. The lookup index is discarded.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}
