// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment intersection search for edge noding.
//!
//! A sweep line over the x-extents of all segments finds candidate pairs.
//! Each segment belongs to an optional set and pairs from the same set are
//! skipped, which gives the three modes: every pair, pairs from different
//! edges, and pairs from different edge lists.
//!
//! Intersections are collected while the edges are only borrowed, then
//! applied to the owning lists afterwards.

use std::ops::ControlFlow;

use geo_lite_core::{Coordinate, Envelope, LineIntersector};

use crate::edge::Edge;

/// Which segment pairs the sweep reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Every pair, including two segments of the same edge.
    AllSegments,
    /// Only pairs from different edges.
    DistinctEdges,
    /// Only pairs from different edge lists.
    DistinctLists,
}

/// Identifies an edge by list and position within that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    pub list: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
struct SweepSegment {
    edge: EdgeRef,
    segment: usize,
    set: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Insert,
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct SweepEvent {
    x: f64,
    kind: EventKind,
    segment: usize,
    delete_index: usize,
}

/// Visits every candidate segment pair of the edges in `lists` whose
/// envelopes overlap in x. Edges outside `env` are ignored. The visitor may
/// stop the sweep early.
pub fn sweep_segment_pairs<F>(lists: &[&[Edge]], env: Option<&Envelope>, mode: SweepMode, mut visit: F)
where
    F: FnMut(EdgeRef, usize, EdgeRef, usize) -> ControlFlow<()>,
{
    let mut segments = Vec::new();
    let mut events = Vec::new();
    let mut next_edge_set = 0;
    for (list, edges) in lists.iter().enumerate() {
        for (index, edge) in edges.iter().enumerate() {
            if env.is_some_and(|env| !env.intersects(edge.envelope())) {
                continue;
            }
            let set = match mode {
                SweepMode::AllSegments => None,
                SweepMode::DistinctEdges => Some(next_edge_set),
                SweepMode::DistinctLists => Some(list),
            };
            next_edge_set += 1;
            let pts = edge.coordinates();
            for segment in 0..pts.len().saturating_sub(1) {
                let (min_x, max_x) = if pts[segment].x <= pts[segment + 1].x {
                    (pts[segment].x, pts[segment + 1].x)
                } else {
                    (pts[segment + 1].x, pts[segment].x)
                };
                let id = segments.len();
                segments.push(SweepSegment {
                    edge: EdgeRef { list, index },
                    segment,
                    set,
                });
                events.push(SweepEvent {
                    x: min_x,
                    kind: EventKind::Insert,
                    segment: id,
                    delete_index: 0,
                });
                events.push(SweepEvent {
                    x: max_x,
                    kind: EventKind::Delete,
                    segment: id,
                    delete_index: 0,
                });
            }
        }
    }

    // inserts sort before deletes at the same x so touching extents overlap
    events.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.kind.cmp(&b.kind)));
    let mut insert_position = vec![0; segments.len()];
    for i in 0..events.len() {
        let ev = events[i];
        match ev.kind {
            EventKind::Insert => insert_position[ev.segment] = i,
            EventKind::Delete => events[insert_position[ev.segment]].delete_index = i,
        }
    }

    for (i, ev0) in events.iter().enumerate() {
        if ev0.kind != EventKind::Insert {
            continue;
        }
        let ss0 = segments[ev0.segment];
        for ev1 in &events[i..ev0.delete_index] {
            if ev1.kind != EventKind::Insert {
                continue;
            }
            let ss1 = segments[ev1.segment];
            if ss0.set.is_some() && ss0.set == ss1.set {
                continue;
            }
            if visit(ss0.edge, ss0.segment, ss1.edge, ss1.segment).is_break() {
                return;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingIntersection {
    edge: EdgeRef,
    segment: usize,
    dist: f64,
    coord: Coordinate,
}

/// Computes the intersections of segment pairs and records them as edge
/// nodes, tracking whether any proper intersection was found.
#[derive(Debug)]
pub struct SegmentIntersector {
    li: LineIntersector,
    include_proper: bool,
    record_isolated: bool,
    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    boundary_nodes: [Vec<Coordinate>; 2],
    num_tests: usize,
    pending: Vec<PendingIntersection>,
    not_isolated: Vec<EdgeRef>,
}

impl SegmentIntersector {
    /// `include_proper` controls whether proper intersections are recorded
    /// as nodes; `record_isolated` clears the isolated flag of edges that
    /// intersect anything.
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        Self {
            li: LineIntersector::new(),
            include_proper,
            record_isolated,
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            boundary_nodes: [Vec::new(), Vec::new()],
            num_tests: 0,
            pending: Vec::new(),
            not_isolated: Vec::new(),
        }
    }

    /// Boundary nodes of both inputs. A proper intersection at one of these
    /// is not a proper interior intersection.
    pub fn set_boundary_nodes(&mut self, bdy0: Vec<Coordinate>, bdy1: Vec<Coordinate>) {
        self.boundary_nodes = [bdy0, bdy1];
    }

    /// Some intersection other than a shared vertex of consecutive segments.
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// A proper intersection not at a boundary node of either input.
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    /// Intersects segment `seg0` of `e0` with segment `seg1` of `e1`.
    pub fn add_intersections(&mut self, r0: EdgeRef, e0: &Edge, seg0: usize, r1: EdgeRef, e1: &Edge, seg1: usize) {
        if r0 == r1 && seg0 == seg1 {
            return;
        }
        self.num_tests += 1;
        let p00 = e0.coordinate(seg0);
        let p01 = e0.coordinate(seg0 + 1);
        let p10 = e1.coordinate(seg1);
        let p11 = e1.coordinate(seg1 + 1);
        self.li.compute_intersection(&p00, &p01, &p10, &p11);
        if !self.li.has_intersection() {
            return;
        }
        if self.record_isolated {
            self.not_isolated.push(r0);
            self.not_isolated.push(r1);
        }
        if self.is_trivial_intersection(r0, e0, seg0, r1, seg1) {
            return;
        }
        self.has_intersection = true;
        if self.include_proper || !self.li.is_proper() {
            for i in 0..self.li.intersection_num() {
                let (segment, dist, coord) = e0.normalized_intersection(&self.li, seg0, 0, i);
                self.pending.push(PendingIntersection { edge: r0, segment, dist, coord });
            }
            for i in 0..self.li.intersection_num() {
                let (segment, dist, coord) = e1.normalized_intersection(&self.li, seg1, 1, i);
                self.pending.push(PendingIntersection { edge: r1, segment, dist, coord });
            }
        }
        if self.li.is_proper() {
            self.has_proper = true;
            if !self.is_boundary_point() {
                self.has_proper_interior = true;
            }
        }
    }

    /// The shared vertex of adjacent segments of one edge, including the
    /// closing vertex of a closed edge.
    fn is_trivial_intersection(&self, r0: EdgeRef, e0: &Edge, seg0: usize, r1: EdgeRef, seg1: usize) -> bool {
        if r0 != r1 || self.li.intersection_num() != 1 {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        if e0.is_closed() {
            let max_seg = e0.num_points() - 2;
            if (seg0 == 0 && seg1 == max_seg) || (seg1 == 0 && seg0 == max_seg) {
                return true;
            }
        }
        false
    }

    fn is_boundary_point(&self) -> bool {
        self.boundary_nodes.iter().flatten().any(|pt| self.li.is_intersection(pt))
    }

    /// Writes the intersections found on edges of list `list` into those
    /// edges.
    pub fn apply_to(&self, list: usize, edges: &mut [Edge]) {
        for p in self.pending.iter().filter(|p| p.edge.list == list) {
            edges[p.edge.index].ei_list.add(p.coord, p.segment, p.dist);
        }
        for r in self.not_isolated.iter().filter(|r| r.list == list) {
            edges[r.index].set_isolated(false);
        }
    }
}

/// Finds and records the intersections between the edges of `lists`.
pub fn compute_intersections(lists: &[&[Edge]], env: Option<&Envelope>, mode: SweepMode, si: &mut SegmentIntersector) {
    sweep_segment_pairs(lists, env, mode, |r0, s0, r1, s1| {
        let e0 = &lists[r0.list][r0.index];
        let e1 = &lists[r1.list][r1.index];
        si.add_intersections(r0, e0, s0, r1, e1, s1);
        ControlFlow::Continue(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    fn line(pts: &[(f64, f64)]) -> Edge {
        Edge::new(pts.iter().map(|&p| Coordinate::from(p)).collect(), Label::default())
    }

    #[test]
    fn crossing_edges_in_different_lists() {
        let a = vec![line(&[(0.0, 0.0), (10.0, 10.0)])];
        let mut b = vec![line(&[(0.0, 10.0), (10.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, true);
        compute_intersections(&[&a[..], &b[..]], None, SweepMode::DistinctLists, &mut si);
        assert!(si.has_intersection());
        assert!(si.has_proper_interior_intersection());

        assert!(b[0].is_isolated());
        si.apply_to(1, &mut b);
        assert!(!b[0].is_isolated());
        assert!(b[0].ei_list.iter().any(|ei| ei.coord == Coordinate::new(5.0, 5.0)));
        let split = b[0].split_edges();
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn adjacent_segments_are_trivial() {
        let zigzag = vec![line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, false);
        compute_intersections(&[&zigzag[..]], None, SweepMode::AllSegments, &mut si);
        assert!(!si.has_intersection());
    }

    #[test]
    fn closing_vertex_of_ring_is_trivial() {
        let ring = vec![line(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, false);
        compute_intersections(&[&ring[..]], None, SweepMode::AllSegments, &mut si);
        assert!(!si.has_intersection());
    }

    #[test]
    fn self_crossing_edge_is_found() {
        let bowtie = vec![line(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, false);
        compute_intersections(&[&bowtie[..]], None, SweepMode::AllSegments, &mut si);
        assert!(si.has_proper_intersection());

        let mut si = SegmentIntersector::new(true, false);
        compute_intersections(&[&bowtie[..]], None, SweepMode::DistinctEdges, &mut si);
        assert!(!si.has_intersection());
    }

    #[test]
    fn envelope_filter_skips_far_edges() {
        let a = vec![line(&[(0.0, 0.0), (10.0, 10.0)])];
        let b = vec![line(&[(0.0, 10.0), (10.0, 0.0)])];
        let env = Envelope::new(Coordinate::new(20.0, 20.0), Coordinate::new(30.0, 30.0));
        let mut si = SegmentIntersector::new(true, true);
        compute_intersections(&[&a[..], &b[..]], Some(&env), SweepMode::DistinctLists, &mut si);
        assert_eq!(si.num_tests(), 0);
    }

    #[test]
    fn sweep_can_stop_early() {
        let edges = vec![
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(0.0, 1.0), (10.0, 1.0)]),
            line(&[(0.0, 2.0), (10.0, 2.0)]),
        ];
        let mut visits = 0;
        sweep_segment_pairs(&[&edges[..]], None, SweepMode::DistinctEdges, |_, _, _, _| {
            visits += 1;
            ControlFlow::Break(())
        });
        assert_eq!(visits, 1);
    }
}
