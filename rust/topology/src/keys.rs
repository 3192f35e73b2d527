// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based graph storage.
//!
//! Edges, directed edges, nodes and edge rings live in `slotmap::SlotMap`s
//! and refer to each other through these keys instead of pointers. A
//! directed edge and its symmetric partner hold each other's key.

use slotmap::new_key_type;

new_key_type! {
    /// Key for an undirected, noded edge.
    pub struct EdgeKey;

    /// Key for one directed traversal of an edge.
    pub struct DirEdgeKey;

    /// Key for a graph node.
    pub struct NodeKey;

    /// Key for an edge ring assembled from result edges.
    pub struct RingKey;
}
