// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DE-9IM relate.

mod computer;
mod edge_end_builder;
mod edge_end_bundle;

pub use computer::RelateComputer;
pub use edge_end_builder::compute_edge_ends;
pub use edge_end_bundle::{EdgeEndBundle, EdgeEndBundleStar};

use geo_lite_core::{BoundaryNodeRule, Geometry, IntersectionMatrix};
use geo_lite_topology::Result;

use crate::check_arguments;

/// Intersection matrix of `a` and `b` under the Mod-2 boundary rule.
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix> {
    relate_with_rule(a, b, BoundaryNodeRule::default())
}

pub fn relate_with_rule(a: &Geometry, b: &Geometry, rule: BoundaryNodeRule) -> Result<IntersectionMatrix> {
    check_arguments(a, b)?;
    RelateComputer::new(a, b, rule)?.compute_im()
}

/// Tests the intersection matrix of `a` and `b` against a pattern such as
/// `"T*F**F***"`.
pub fn relate_pattern(a: &Geometry, b: &Geometry, pattern: &str) -> Result<bool> {
    Ok(relate(a, b)?.matches(pattern)?)
}
