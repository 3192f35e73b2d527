// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Post-noding check: split edges may only meet at their endpoints.

use std::ops::ControlFlow;

use geo_lite_core::{Coordinate, Envelope, LineIntersector};

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::noding::{sweep_segment_pairs, SweepMode};

/// Fails with a topology error at the first place where two edges meet
/// other than end to end: segments crossing or touching away from their
/// endpoints, or an edge passing through a vertex of another edge.
///
/// Only intersections covered by `env` are reported when one is given.
pub fn check_noding(edges: &[Edge], env: Option<&Envelope>) -> Result<()> {
    let mut li = LineIntersector::new();
    let mut failure = None;
    sweep_segment_pairs(&[edges], None, SweepMode::AllSegments, |r0, s0, r1, s1| {
        if r0 == r1 && s0.abs_diff(s1) <= 1 {
            return ControlFlow::Continue(());
        }
        let e0 = &edges[r0.index];
        let e1 = &edges[r1.index];
        li.compute_intersection(&e0.coordinate(s0), &e0.coordinate(s0 + 1), &e1.coordinate(s1), &e1.coordinate(s1 + 1));
        if !li.has_intersection() {
            return ControlFlow::Continue(());
        }
        let hit = if li.is_interior_intersection() {
            Some(li.intersection(0))
        } else {
            interior_vertex_intersection(e0, s0, e1, s1)
        };
        match hit {
            Some(pt) if env.map_or(true, |e| e.covers_coord(&pt)) => {
                failure = Some(pt);
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    });
    match failure {
        Some(pt) => Err(Error::topology("found non-noded intersection", Some(pt))),
        None => Ok(()),
    }
}

/// A shared vertex of two segments that is not an endpoint of both edges.
fn interior_vertex_intersection(e0: &Edge, s0: usize, e1: &Edge, s1: usize) -> Option<Coordinate> {
    let is_end = |e: &Edge, i: usize| i == 0 || i + 1 == e.num_points();
    for i0 in [s0, s0 + 1] {
        for i1 in [s1, s1 + 1] {
            if is_end(e0, i0) && is_end(e1, i1) {
                continue;
            }
            let p = e0.coordinate(i0);
            if p.equals_2d(&e1.coordinate(i1)) {
                return Some(p);
            }
        }
    }
    None
}
