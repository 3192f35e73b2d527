// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The outgoing directed edges of a node, in counter-clockwise order.
//!
//! Directed edges live in the graph's arena; the star only holds keys. Every
//! operation therefore borrows the arena alongside the star, which lets the
//! graph hand out its node map and its edge arenas as disjoint borrows.

use std::cmp::Ordering;

use geo_lite_core::{Coordinate, Geometry, Location};
use slotmap::SlotMap;
use tracing::trace;

use crate::directed_edge::DirectedEdge;
use crate::edge::Edge;
use crate::edge_end_star::compute_star_labelling;
use crate::error::{Error, Result};
use crate::keys::{DirEdgeKey, EdgeKey, RingKey};
use crate::label::Label;

pub type DirEdgeArena = SlotMap<DirEdgeKey, DirectedEdge>;
pub type EdgeArena = SlotMap<EdgeKey, Edge>;

#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeStar {
    ends: Vec<DirEdgeKey>,
    /// Summary of the incident edge labels: interior for every geometry the
    /// node lies on a line or boundary of.
    pub label: Label,
}

impl DirectedEdgeStar {
    /// Inserts an outgoing edge keeping the star sorted.
    pub fn insert(&mut self, key: DirEdgeKey, dir_edges: &DirEdgeArena) {
        let end = &dir_edges[key].end;
        let pos = self
            .ends
            .partition_point(|k| dir_edges[*k].end.compare_direction_then_length(end) != Ordering::Greater);
        self.ends.insert(pos, key);
    }

    pub fn edges(&self) -> &[DirEdgeKey] {
        &self.ends
    }

    pub fn degree(&self) -> usize {
        self.ends.len()
    }

    /// Completes the directed edge labels and derives the star label.
    pub fn compute_labelling(
        &mut self,
        dir_edges: &mut DirEdgeArena,
        edges: &EdgeArena,
        coord: Coordinate,
        args: [&Geometry; 2],
    ) -> Result<()> {
        let mut labels: Vec<Label> = self.ends.iter().map(|k| *dir_edges[*k].label()).collect();
        compute_star_labelling(&mut labels, coord, args)?;
        for (key, label) in self.ends.iter().zip(labels) {
            *dir_edges[*key].label_mut() = label;
        }

        let mut star_label = Label::new_line(None);
        for key in &self.ends {
            let edge_label = &edges[dir_edges[*key].edge].label;
            for i in 0..2 {
                if matches!(edge_label.location_on(i), Some(Location::Interior | Location::Boundary)) {
                    star_label.set_location_on(i, Some(Location::Interior));
                }
            }
        }
        self.label = star_label;
        Ok(())
    }

    /// Merges each edge's label with that of its opposite direction.
    pub fn merge_sym_labels(&self, dir_edges: &mut DirEdgeArena) {
        for key in &self.ends {
            let sym_label = *dir_edges[dir_edges[*key].sym].label();
            dir_edges[*key].label_mut().merge(&sym_label);
        }
    }

    /// Fills unknown edge locations from the node label.
    pub fn update_labelling(&self, dir_edges: &mut DirEdgeArena, node_label: &Label) {
        for key in &self.ends {
            let label = dir_edges[*key].label_mut();
            label.set_all_locations_if_null(0, node_label.location_on(0));
            label.set_all_locations_if_null(1, node_label.location_on(1));
        }
    }

    /// Edges bounding a result area in either direction.
    pub fn result_area_edges(&self, dir_edges: &DirEdgeArena) -> Vec<DirEdgeKey> {
        self.ends
            .iter()
            .copied()
            .filter(|k| dir_edges[*k].in_result || dir_edges[dir_edges[*k].sym].in_result)
            .collect()
    }

    /// Links every incoming result edge to the next outgoing result edge
    /// counter-clockwise, forming maximal rings.
    pub fn link_result_directed_edges(&self, dir_edges: &mut DirEdgeArena, coord: Coordinate) -> Result<()> {
        let result_edges = self.result_area_edges(dir_edges);
        let mut first_out = None;
        let mut incoming: Option<DirEdgeKey> = None;

        for &next_out in &result_edges {
            if !dir_edges[next_out].label().is_area() {
                continue;
            }
            let next_in = dir_edges[next_out].sym;
            if first_out.is_none() && dir_edges[next_out].in_result {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if dir_edges[next_in].in_result {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if dir_edges[next_out].in_result {
                        dir_edges[inc].next = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let Some(first) = first_out else {
                return Err(Error::topology("no outgoing directed edge found", Some(coord)));
            };
            dir_edges[inc].next = Some(first);
        }
        trace!(x = coord.x, y = coord.y, edges = result_edges.len(), "linked result edges at node");
        Ok(())
    }

    /// Links the edges of one maximal ring into minimal rings by turning
    /// clockwise at each node.
    pub fn link_minimal_directed_edges(
        &self,
        dir_edges: &mut DirEdgeArena,
        ring: RingKey,
        coord: Coordinate,
    ) -> Result<()> {
        let result_edges = self.result_area_edges(dir_edges);
        let mut first_out = None;
        let mut incoming: Option<DirEdgeKey> = None;

        for &next_out in result_edges.iter().rev() {
            let next_in = dir_edges[next_out].sym;
            if first_out.is_none() && dir_edges[next_out].edge_ring == Some(ring) {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if dir_edges[next_in].edge_ring == Some(ring) {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if dir_edges[next_out].edge_ring == Some(ring) {
                        dir_edges[inc].next_min = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let Some(first) = first_out else {
                return Err(Error::topology("found no outgoing edge for minimal ring", Some(coord)));
            };
            dir_edges[inc].next_min = Some(first);
        }
        Ok(())
    }

    /// Number of outgoing edges belonging to `ring`.
    pub fn outgoing_degree(&self, dir_edges: &DirEdgeArena, ring: RingKey) -> usize {
        self.ends.iter().filter(|k| dir_edges[**k].edge_ring == Some(ring)).count()
    }

    /// Marks line edges at this node as covered when they run through the
    /// interior of the result area.
    pub fn find_covered_line_edges(&self, dir_edges: &DirEdgeArena, edges: &mut EdgeArena) {
        let mut start_loc = None;
        for key in &self.ends {
            let de = &dir_edges[*key];
            if de.is_line_edge() {
                continue;
            }
            if de.in_result {
                start_loc = Some(Location::Interior);
                break;
            }
            if dir_edges[de.sym].in_result {
                start_loc = Some(Location::Exterior);
                break;
            }
        }
        let Some(mut curr_loc) = start_loc else {
            return;
        };

        for key in &self.ends {
            let de = &dir_edges[*key];
            if de.is_line_edge() {
                edges[de.edge].set_covered(curr_loc == Location::Interior);
            } else {
                if de.in_result {
                    curr_loc = Location::Exterior;
                }
                if dir_edges[de.sym].in_result {
                    curr_loc = Location::Interior;
                }
            }
        }
    }
}
