// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GEO-Lite Core
//!
//! Planar geometry model and the numeric primitives the topology engine is
//! built on.
//!
//! ## Overview
//!
//! - **Geometry model**: a closed [`Geometry`] enum over points, lines,
//!   rings, polygons and their collections, with dimension, envelope and
//!   measures computed per variant
//! - **Robust predicates**: [`orientation_index`] with a double-double
//!   fallback, ring orientation and ray-crossing point-in-ring
//! - **Segment intersection**: [`LineIntersector`] classifies segment pairs
//!   and constructs intersection points with z interpolation
//! - **Point location**: [`PointLocator`] for any geometry under a
//!   [`BoundaryNodeRule`], plus area-only location
//! - **DE-9IM**: [`IntersectionMatrix`] with pattern matching and the named
//!   spatial predicates
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_lite_core::{Coordinate, Geometry, LinearRing, Location, Polygon, PointLocator};
//!
//! let ring = LinearRing::try_from(vec![
//!     (0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0),
//! ]).unwrap();
//! let square = Geometry::from(Polygon::new(ring, vec![]));
//!
//! let locator = PointLocator::default();
//! assert_eq!(locator.locate(&Coordinate::new(2.0, 2.0), &square), Location::Interior);
//! assert_eq!(locator.locate(&Coordinate::new(4.0, 2.0), &square), Location::Boundary);
//! assert_eq!(square.area(), 16.0);
//! ```

pub mod algorithm;
pub mod coord;
pub mod envelope;
pub mod error;
pub mod geometry;
pub mod intersection_matrix;
pub mod line_intersector;
pub mod locate;
pub mod location;

pub use algorithm::{orientation_index, Orientation};
pub use coord::{CoordKey, Coordinate};
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use geometry::{
    build_geometry, Geometry, GeometryCollection, GeometryType, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
pub use intersection_matrix::IntersectionMatrix;
pub use line_intersector::{z_interpolate, IntersectionKind, LineIntersector};
pub use locate::{has_boundary, locate_in_area, BoundaryNodeRule, PointLocator};
pub use location::{Dimension, Location};
