// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named spatial predicates.
//!
//! Each predicate is answered from the intersection matrix, after cheap
//! envelope and dimension tests that settle many cases without building a
//! graph.

use geo_lite_core::{Dimension, Geometry};
use geo_lite_topology::Result;

use crate::check_arguments;
use crate::relate::relate;

pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !a.envelope().intersects(&b.envelope()) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_intersects())
}

pub fn disjoint(a: &Geometry, b: &Geometry) -> Result<bool> {
    intersects(a, b).map(|i| !i)
}

pub fn touches(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !a.envelope().intersects(&b.envelope()) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_touches(a.dimension(), b.dimension()))
}

pub fn crosses(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !a.envelope().intersects(&b.envelope()) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_crosses(a.dimension(), b.dimension()))
}

pub fn overlaps(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !a.envelope().intersects(&b.envelope()) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_overlaps(a.dimension(), b.dimension()))
}

pub fn contains(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !may_cover(a, b) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_contains())
}

pub fn within(a: &Geometry, b: &Geometry) -> Result<bool> {
    contains(b, a)
}

pub fn covers(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if !may_cover(a, b) {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_covers())
}

pub fn covered_by(a: &Geometry, b: &Geometry) -> Result<bool> {
    covers(b, a)
}

/// Point-set equality. Two empty geometries are equal.
pub fn equals_topo(a: &Geometry, b: &Geometry) -> Result<bool> {
    check_arguments(a, b)?;
    if a.is_empty() && b.is_empty() {
        return Ok(true);
    }
    if a.envelope() != b.envelope() {
        return Ok(false);
    }
    Ok(relate(a, b)?.is_equals(a.dimension(), b.dimension()))
}

/// A lower-dimensional geometry cannot cover a higher-dimensional one, and
/// the covering envelope must cover the other.
fn may_cover(a: &Geometry, b: &Geometry) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (dim_a, dim_b) = (a.dimension(), b.dimension());
    if dim_b == Dimension::Area && dim_a < Dimension::Area {
        return false;
    }
    if dim_b == Dimension::Line && dim_a < Dimension::Line && b.length() > 0.0 {
        return false;
    }
    a.envelope().covers(&b.envelope())
}
