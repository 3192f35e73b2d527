// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembles result polygons from the result area edges of a graph.
//!
//! Result edges are linked into maximal rings. A maximal ring touching
//! itself is split into minimal rings, at most one of which may be a shell.
//! Holes not owned by such a shell are assigned to the smallest shell that
//! contains them.

use geo_lite_core::algorithm::is_in_ring;
use geo_lite_core::{Coordinate, Polygon};
use geo_lite_topology::{Error, PlanarGraph, Result, RingKey};
use tracing::{debug, trace};

use crate::edge_ring::{self, EdgeRing, RingArena, RingKind};

#[derive(Debug, Default)]
pub struct PolygonBuilder {
    rings: RingArena,
    shells: Vec<RingKey>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds rings from the edges of `graph` flagged as in the result.
    pub fn add(&mut self, graph: &mut PlanarGraph) -> Result<()> {
        graph.link_result_directed_edges()?;
        let maximal = self.build_maximal_rings(graph)?;

        let mut free_holes = Vec::new();
        let mut simple = Vec::new();
        for key in maximal {
            if self.rings[key].max_node_degree(key, graph) > 2 {
                edge_ring::link_minimal_edges(&self.rings, key, graph)?;
                let minimal = edge_ring::build_minimal_rings(&mut self.rings, key, graph)?;
                trace!(minimal = minimal.len(), "split self-touching maximal ring");
                match self.find_shell(&minimal)? {
                    Some(shell) => {
                        for &ring in &minimal {
                            if self.rings[ring].is_hole() {
                                edge_ring::set_shell(&mut self.rings, ring, shell);
                            }
                        }
                        self.shells.push(shell);
                    }
                    None => free_holes.extend(minimal),
                }
            } else {
                simple.push(key);
            }
        }

        for key in simple {
            if self.rings[key].is_hole() {
                free_holes.push(key);
            } else {
                self.shells.push(key);
            }
        }
        self.place_free_holes(&free_holes)?;

        debug!(shells = self.shells.len(), holes = free_holes.len(), "built result rings");
        Ok(())
    }

    /// The polygons built so far, one per shell.
    pub fn polygons(&self) -> Vec<Polygon> {
        self.shells
            .iter()
            .map(|shell| edge_ring::to_polygon(&self.rings, *shell))
            .collect()
    }

    /// `true` if `p` lies in or on one of the built polygons.
    pub fn contains_point(&self, p: &Coordinate) -> bool {
        self.shells
            .iter()
            .any(|shell| edge_ring::contains_point(&self.rings, *shell, p))
    }

    fn build_maximal_rings(&mut self, graph: &mut PlanarGraph) -> Result<Vec<RingKey>> {
        let mut maximal = Vec::new();
        for i in 0..graph.edge_ends.len() {
            let key = graph.edge_ends[i];
            let de = &graph.dir_edges[key];
            if !de.in_result || !de.label().is_area() || de.edge_ring.is_some() {
                continue;
            }
            let ring = EdgeRing::build(&mut self.rings, graph, key, RingKind::Maximal)?;
            self.rings[ring].set_in_result(graph);
            maximal.push(ring);
        }
        Ok(maximal)
    }

    fn find_shell(&self, minimal: &[RingKey]) -> Result<Option<RingKey>> {
        let mut shells = minimal.iter().copied().filter(|k| !self.rings[*k].is_hole());
        let shell = shells.next();
        if shells.next().is_some() {
            let at = self.rings[minimal[0]].coordinate(0);
            return Err(Error::topology("found two shells in minimal edge ring list", Some(at)));
        }
        Ok(shell)
    }

    fn place_free_holes(&mut self, holes: &[RingKey]) -> Result<()> {
        for &hole in holes {
            if self.rings[hole].shell().is_some() {
                continue;
            }
            let Some(shell) = self.find_containing_shell(hole) else {
                let at = self.rings[hole].coordinate(0);
                return Err(Error::topology("unable to assign hole to a shell", Some(at)));
            };
            edge_ring::set_shell(&mut self.rings, hole, shell);
        }
        Ok(())
    }

    /// Smallest shell whose ring strictly encloses the hole.
    fn find_containing_shell(&self, hole: RingKey) -> Option<RingKey> {
        let test = &self.rings[hole];
        let test_env = test.envelope();
        let test_pts = test.linear_ring().coords();

        let mut best: Option<RingKey> = None;
        for &shell in &self.shells {
            let candidate = &self.rings[shell];
            let env = candidate.envelope();
            if env == test_env || !env.covers(test_env) {
                continue;
            }
            let shell_pts = candidate.linear_ring().coords();
            let Some(p) = point_not_in_list(test_pts, shell_pts) else {
                continue;
            };
            if !is_in_ring(&p, shell_pts) {
                continue;
            }
            let smaller = best.map_or(true, |b| self.rings[b].envelope().covers(env));
            if smaller {
                best = Some(shell);
            }
        }
        best
    }
}

fn point_not_in_list(pts: &[Coordinate], list: &[Coordinate]) -> Option<Coordinate> {
    pts.iter()
        .find(|p| !list.iter().any(|q| q.equals_2d(p)))
        .copied()
}
