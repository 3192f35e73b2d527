// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rings of result directed edges.
//!
//! A maximal ring follows the `next` links set when result edges are linked
//! at each node; it may touch itself. A minimal ring follows `next_min` and
//! never does. Rings are stored in an arena and refer to their shell and
//! holes by key.

use geo_lite_core::algorithm::{is_ccw, is_in_ring};
use geo_lite_core::{Coordinate, Envelope, LinearRing, Polygon};
use geo_lite_topology::{DirEdgeKey, Edge, Error, Label, PlanarGraph, Position, Result, RingKey};
use slotmap::SlotMap;

pub type RingArena = SlotMap<RingKey, EdgeRing>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Maximal,
    Minimal,
}

#[derive(Debug, Clone)]
pub struct EdgeRing {
    edges: Vec<DirEdgeKey>,
    label: Label,
    ring: LinearRing,
    env: Envelope,
    is_hole: bool,
    shell: Option<RingKey>,
    holes: Vec<RingKey>,
}

impl EdgeRing {
    /// Traces the ring through `start` and claims its directed edges.
    pub fn build(rings: &mut RingArena, graph: &mut PlanarGraph, start: DirEdgeKey, kind: RingKind) -> Result<RingKey> {
        rings.try_insert_with_key(|key| Self::trace(key, graph, start, kind))
    }

    fn trace(key: RingKey, graph: &mut PlanarGraph, start: DirEdgeKey, kind: RingKind) -> Result<Self> {
        let mut edges = Vec::new();
        let mut pts = Vec::new();
        let mut label = Label::new_line(None);
        let mut current = start;
        loop {
            let de = &graph.dir_edges[current];
            let claimed = match kind {
                RingKind::Maximal => de.edge_ring,
                RingKind::Minimal => de.min_edge_ring,
            };
            if claimed == Some(key) {
                return Err(Error::topology(
                    "directed edge visited twice during ring-building",
                    Some(de.coordinate()),
                ));
            }
            if !de.label().is_area() {
                return Err(Error::topology("ring edge has no area label", Some(de.coordinate())));
            }
            edges.push(current);
            merge_right_locations(&mut label, de.label());
            add_points(&mut pts, &graph.edges[de.edge], de.forward, edges.len() == 1);
            let next = match kind {
                RingKind::Maximal => de.next,
                RingKind::Minimal => de.next_min,
            };
            let coord = de.coordinate();

            let de = &mut graph.dir_edges[current];
            match kind {
                RingKind::Maximal => de.edge_ring = Some(key),
                RingKind::Minimal => de.min_edge_ring = Some(key),
            }
            current = next.ok_or_else(|| Error::topology("found unlinked directed edge in ring", Some(coord)))?;
            if current == start {
                break;
            }
        }

        if pts.len() < 4 {
            return Err(Error::topology("edge ring has too few points", pts.first().copied()));
        }
        // result shells run clockwise, so a counter-clockwise ring is a hole
        let is_hole = is_ccw(&pts)?;
        let ring = LinearRing::new(pts)?;
        let env = ring.envelope();
        Ok(Self {
            edges,
            label,
            ring,
            env,
            is_hole,
            shell: None,
            holes: Vec::new(),
        })
    }

    pub fn edges(&self) -> &[DirEdgeKey] {
        &self.edges
    }

    /// Locations of the ring's interior relative to both inputs.
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn linear_ring(&self) -> &LinearRing {
        &self.ring
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn coordinate(&self, i: usize) -> Coordinate {
        self.ring.coords()[i]
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn shell(&self) -> Option<RingKey> {
        self.shell
    }

    /// Largest number of ring edges meeting at any node of this ring.
    pub fn max_node_degree(&self, key: RingKey, graph: &PlanarGraph) -> usize {
        let max_outgoing = self
            .edges
            .iter()
            .map(|de| {
                let node = graph.dir_edges[*de].node;
                graph.nodes[node].star.outgoing_degree(&graph.dir_edges, key)
            })
            .max()
            .unwrap_or(0);
        max_outgoing * 2
    }

    /// Flags every edge of the ring as part of the result.
    pub fn set_in_result(&self, graph: &mut PlanarGraph) {
        for de in &self.edges {
            let edge = graph.dir_edges[*de].edge;
            graph.edges[edge].set_in_result(true);
        }
    }
}

/// Assigns `hole` to `shell`.
pub fn set_shell(rings: &mut RingArena, hole: RingKey, shell: RingKey) {
    rings[hole].shell = Some(shell);
    rings[shell].holes.push(hole);
}

/// `true` if `p` is inside the ring or on its boundary and not inside one of
/// its holes.
pub fn contains_point(rings: &RingArena, key: RingKey, p: &Coordinate) -> bool {
    let ring = &rings[key];
    if !ring.env.covers_coord(p) || !is_in_ring(p, ring.ring.coords()) {
        return false;
    }
    !ring.holes.iter().any(|h| contains_point(rings, *h, p))
}

/// Polygon made of a shell ring and its holes.
pub fn to_polygon(rings: &RingArena, shell: RingKey) -> Polygon {
    let ring = &rings[shell];
    let holes = ring.holes.iter().map(|h| rings[*h].ring.clone()).collect();
    Polygon::new(ring.ring.clone(), holes)
}

/// Links the edges of a maximal ring at each of its nodes so minimal rings
/// can be traced.
pub fn link_minimal_edges(rings: &RingArena, key: RingKey, graph: &mut PlanarGraph) -> Result<()> {
    for de in &rings[key].edges {
        let node_key = graph.dir_edges[*de].node;
        let node = &graph.nodes[node_key];
        node.star
            .link_minimal_directed_edges(&mut graph.dir_edges, key, node.coordinate())?;
    }
    Ok(())
}

/// Traces the minimal rings contained in a maximal ring.
pub fn build_minimal_rings(rings: &mut RingArena, key: RingKey, graph: &mut PlanarGraph) -> Result<Vec<RingKey>> {
    let edges = rings[key].edges.clone();
    let mut minimal = Vec::new();
    for de in edges {
        if graph.dir_edges[de].min_edge_ring.is_none() {
            minimal.push(EdgeRing::build(rings, graph, de, RingKind::Minimal)?);
        }
    }
    Ok(minimal)
}

/// Takes the right-side location of each geometry from a ring edge, which
/// is the location of the ring's interior.
fn merge_right_locations(label: &mut Label, de_label: &Label) {
    for i in 0..2 {
        let Some(loc) = de_label.location(i, Position::Right) else {
            continue;
        };
        if label.location_on(i).is_none() {
            label.set_location_on(i, Some(loc));
        }
    }
}

/// Appends an edge's points in traversal order. The first point repeats the
/// previous edge's last point and is skipped except for the first edge.
fn add_points(pts: &mut Vec<Coordinate>, edge: &Edge, forward: bool, is_first_edge: bool) {
    let edge_pts = edge.coordinates();
    let skip = usize::from(!is_first_edge);
    if forward {
        pts.extend(edge_pts.iter().skip(skip));
    } else {
        pts.extend(edge_pts.iter().rev().skip(skip));
    }
}
