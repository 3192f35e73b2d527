// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GEO-Lite Overlay
//!
//! Boolean overlay, DE-9IM relate and spatial predicates for
//! [`geo_lite_core`] geometries.
//!
//! ## Overview
//!
//! - **Overlay**: [`intersection`], [`union`], [`difference`] and
//!   [`sym_difference`] of any two non-collection geometries, of any
//!   dimension
//! - **Relate**: the full [`IntersectionMatrix`](geo_lite_core::IntersectionMatrix)
//!   of two geometries, optionally under another boundary node rule
//! - **Predicates**: [`intersects`], [`contains`], [`touches`] and the
//!   other named predicates
//! - **Point location**: [`locate`]
//!
//! Topology errors ([`Error::is_topology`]) signal a numerically
//! inconsistent graph; callers may retry on snapped input.
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_lite_core::{Geometry, LinearRing, Polygon};
//! use geo_lite_overlay::{intersection, union};
//!
//! fn square(x: f64, y: f64, size: f64) -> Geometry {
//!     let ring = LinearRing::try_from(vec![
//!         (x, y), (x + size, y), (x + size, y + size), (x, y + size), (x, y),
//!     ]).unwrap();
//!     Polygon::new(ring, vec![]).into()
//! }
//!
//! let a = square(0.0, 0.0, 1.0);
//! let b = square(0.5, 0.5, 1.0);
//! assert!((intersection(&a, &b)?.area() - 0.25).abs() < 1e-12);
//! assert!((union(&a, &b)?.area() - 1.75).abs() < 1e-12);
//! # Ok::<(), geo_lite_overlay::Error>(())
//! ```

pub mod config;
pub mod edge_ring;
pub mod interrupt;
pub mod line_builder;
pub mod op_code;
pub mod overlay_op;
pub mod point_builder;
pub mod polygon_builder;
pub mod predicates;
pub mod relate;

pub use config::OverlayConfig;
pub use geo_lite_topology::{Error, Result};
pub use interrupt::Interrupt;
pub use op_code::{is_result_of_op, OpCode};
pub use overlay_op::OverlayOp;
pub use predicates::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps, touches, within,
};
pub use relate::{relate, relate_pattern, relate_with_rule, RelateComputer};

use geo_lite_core::{Coordinate, Geometry, Location, PointLocator};

/// Overlays two geometries with the configuration from the environment.
pub fn overlay(a: &Geometry, b: &Geometry, op: OpCode) -> Result<Geometry> {
    overlay_with_config(a, b, op, &OverlayConfig::from_env())
}

pub fn overlay_with_config(a: &Geometry, b: &Geometry, op: OpCode, config: &OverlayConfig) -> Result<Geometry> {
    a.validate_coordinates()?;
    b.validate_coordinates()?;
    if let Some(result) = empty_operand_result(a, b, op) {
        return Ok(result);
    }
    reject_collections(a, b)?;
    OverlayOp::new(a, b, config.clone())?.result_geometry(op)
}

pub fn intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Intersection)
}

pub fn union(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Union)
}

pub fn difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Difference)
}

pub fn sym_difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::SymDifference)
}

/// Location of `p` relative to `geom` under the Mod-2 boundary rule.
pub fn locate(p: &Coordinate, geom: &Geometry) -> Location {
    PointLocator::default().locate(p, geom)
}

/// Result of an overlay with an empty operand, which needs no graph.
fn empty_operand_result(a: &Geometry, b: &Geometry, op: OpCode) -> Option<Geometry> {
    if !a.is_empty() && !b.is_empty() {
        return None;
    }
    let empty = || Geometry::empty_of_dimension(op.result_dimension(a.dimension(), b.dimension()));
    let result = match op {
        OpCode::Intersection => empty(),
        OpCode::Union | OpCode::SymDifference if a.is_empty() && b.is_empty() => empty(),
        OpCode::Union | OpCode::SymDifference if a.is_empty() => b.clone(),
        OpCode::Union | OpCode::SymDifference => a.clone(),
        OpCode::Difference if a.is_empty() => empty(),
        OpCode::Difference => a.clone(),
    };
    Some(result)
}

fn reject_collections(a: &Geometry, b: &Geometry) -> Result<()> {
    if a.is_collection() || b.is_collection() {
        return Err(geo_lite_core::Error::IllegalArgument(
            "GeometryCollection arguments are not supported".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Validation shared by relate and the predicates.
pub(crate) fn check_arguments(a: &Geometry, b: &Geometry) -> Result<()> {
    a.validate_coordinates()?;
    b.validate_coordinates()?;
    reject_collections(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::{GeometryCollection, LineString, Point, Polygon};

    #[test]
    fn empty_operands_short_cut() {
        let line: Geometry = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]).into();
        let empty_poly: Geometry = Polygon::empty().into();

        let r = intersection(&line, &empty_poly).unwrap();
        assert!(matches!(&r, Geometry::LineString(ls) if ls.is_empty()));
        assert_eq!(union(&empty_poly, &line).unwrap(), line);
        assert_eq!(difference(&line, &empty_poly).unwrap(), line);
        let r = difference(&empty_poly, &line).unwrap();
        assert!(matches!(&r, Geometry::Polygon(p) if p.is_empty()));
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        let bad: Geometry = Point::new(Coordinate::new(f64::NAN, 0.0)).into();
        let good: Geometry = Point::new(Coordinate::new(0.0, 0.0)).into();
        let err = union(&bad, &good).unwrap_err();
        assert!(matches!(err, Error::Core(geo_lite_core::Error::InvalidGeometry(_))));
    }

    #[test]
    fn collections_are_illegal_arguments() {
        let gc: Geometry = GeometryCollection(vec![Point::new(Coordinate::new(0.0, 0.0)).into()]).into();
        let pt: Geometry = Point::new(Coordinate::new(1.0, 1.0)).into();
        let err = union(&gc, &pt).unwrap_err();
        assert!(matches!(err, Error::Core(geo_lite_core::Error::IllegalArgument(_))));
        assert!(!err.is_topology());
    }

    #[test]
    fn locate_is_exposed() {
        let pt: Geometry = Point::new(Coordinate::new(1.0, 1.0)).into();
        assert_eq!(locate(&Coordinate::new(1.0, 1.0), &pt), Location::Interior);
        assert_eq!(locate(&Coordinate::new(2.0, 1.0), &pt), Location::Exterior);
    }
}
