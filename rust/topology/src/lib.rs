// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GEO-Lite Topology
//!
//! Labelled planar topology graphs for overlay and relate.
//!
//! Each input geometry is turned into a [`GeometryGraph`] of labelled edges
//! and nodes. The graphs are noded against themselves and each other, split
//! at every intersection and merged into a single [`PlanarGraph`] whose
//! directed edges carry the location of each side relative to both inputs.
//!
//! Graph elements live in slot maps and refer to each other through the
//! keys in [`keys`]. Stars of directed edges hold keys only, so labelling
//! and ring linking borrow the arenas explicitly.

pub mod depth;
pub mod directed_edge;
pub mod directed_edge_star;
pub mod edge;
pub mod edge_end;
pub mod edge_end_star;
pub mod edge_intersection;
pub mod error;
pub mod geometry_graph;
pub mod keys;
pub mod label;
pub mod node;
pub mod noding;
pub mod planar_graph;
pub mod position;
pub mod validate;

pub use depth::Depth;
pub use directed_edge::DirectedEdge;
pub use directed_edge_star::{DirEdgeArena, DirectedEdgeStar, EdgeArena};
pub use edge::{Edge, EdgeList};
pub use edge_end::{EdgeEnd, Quadrant};
pub use edge_end_star::compute_star_labelling;
pub use edge_intersection::{EdgeIntersection, EdgeIntersectionList};
pub use error::{Error, Result};
pub use geometry_graph::GeometryGraph;
pub use keys::{DirEdgeKey, EdgeKey, NodeKey, RingKey};
pub use label::{Label, TopologyLocation};
pub use node::{Node, NodeMap};
pub use noding::{compute_intersections, EdgeRef, SegmentIntersector, SweepMode};
pub use planar_graph::PlanarGraph;
pub use position::Position;
pub use validate::check_noding;
