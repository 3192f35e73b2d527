// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar geometry value types.
//!
//! [`Geometry`] is a closed set of variants. Dimension, envelope, coordinate
//! counts and the simple measures are computed per variant rather than
//! dispatched through a trait object, so every consumer can match on the
//! concrete shape when it needs to.

use std::fmt;

use crate::algorithm::area;
use crate::coord::Coordinate;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::location::Dimension;

/// Discriminant for geometry variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single position, possibly empty.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub coord: Option<Coordinate>,
}

impl Point {
    pub fn new(coord: Coordinate) -> Self {
        Self { coord: Some(coord) }
    }

    pub fn empty() -> Self {
        Self { coord: None }
    }

    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }
}

/// An open or closed polyline.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString {
    pub coords: Vec<Coordinate>,
}

impl LineString {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    pub fn empty() -> Self {
        Self { coords: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// A non-empty line whose first and last vertices coincide.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => a.equals_2d(b),
            _ => false,
        }
    }

    pub fn length(&self) -> f64 {
        area::line_length(&self.coords)
    }
}

impl From<Vec<(f64, f64)>> for LineString {
    fn from(pts: Vec<(f64, f64)>) -> Self {
        Self::new(pts.into_iter().map(Coordinate::from).collect())
    }
}

/// A closed, simple polyline used as a polygon boundary.
///
/// Holds either no coordinates or at least four with the first equal to the
/// last.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRing {
    coords: Vec<Coordinate>,
}

impl LinearRing {
    /// Creates a ring, checking closure and the minimum point count.
    pub fn new(coords: Vec<Coordinate>) -> Result<Self> {
        if coords.is_empty() {
            return Ok(Self { coords });
        }
        if coords.len() < 4 {
            return Err(Error::IllegalArgument(format!(
                "invalid number of points in LinearRing: found {}, must be 0 or >= 4",
                coords.len()
            )));
        }
        if !coords[0].equals_2d(&coords[coords.len() - 1]) {
            return Err(Error::IllegalArgument(
                "points of LinearRing do not form a closed linestring".to_string(),
            ));
        }
        Ok(Self { coords })
    }

    pub fn empty() -> Self {
        Self { coords: Vec::new() }
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Coordinate> {
        self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(&self.coords)
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        area::signed_area(&self.coords).abs()
    }

    pub fn length(&self) -> f64 {
        area::line_length(&self.coords)
    }
}

impl TryFrom<Vec<(f64, f64)>> for LinearRing {
    type Error = Error;

    fn try_from(pts: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(pts.into_iter().map(Coordinate::from).collect())
    }
}

/// A planar area bounded by one exterior ring and zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub exterior: LinearRing,
    pub interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self { exterior, interiors }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Exterior followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let holes: f64 = self.interiors.iter().map(LinearRing::area).sum();
        self.exterior.area() - holes
    }

    /// Total length of all rings.
    pub fn length(&self) -> f64 {
        self.rings().map(LinearRing::length).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPoint(pub Vec<Point>);

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiLineString(pub Vec<LineString>);

impl MultiLineString {
    /// Every component is closed (vacuously true for no components).
    pub fn is_closed(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(LineString::is_closed)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon(pub Vec<Polygon>);

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection(pub Vec<Geometry>);

/// Any planar geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Topological dimension. Typed variants keep their dimension when empty;
    /// a collection takes the largest dimension of its members.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
                Dimension::Line
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Area,
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::False),
        }
    }

    /// Dimension of the boundary under the Mod-2 rule.
    pub fn boundary_dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::False,
            Geometry::LineString(ls) => {
                if ls.is_empty() || ls.is_closed() {
                    Dimension::False
                } else {
                    Dimension::Point
                }
            }
            Geometry::LinearRing(_) => Dimension::False,
            Geometry::MultiLineString(mls) => {
                if mls.0.is_empty() || mls.is_closed() {
                    Dimension::False
                } else {
                    Dimension::Point
                }
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Line,
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or(Dimension::False),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.is_empty(),
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::LinearRing(lr) => lr.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(mp) => mp.0.iter().all(Point::is_empty),
            Geometry::MultiLineString(mls) => mls.0.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(mp) => mp.0.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gc) => gc.0.iter().all(Geometry::is_empty),
        }
    }

    /// `true` only for the heterogeneous collection variant.
    pub fn is_collection(&self) -> bool {
        matches!(self, Geometry::GeometryCollection(_))
    }

    /// Number of top-level components (1 for atomic variants).
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(mp) => mp.0.len(),
            Geometry::MultiLineString(mls) => mls.0.len(),
            Geometry::MultiPolygon(mp) => mp.0.len(),
            Geometry::GeometryCollection(gc) => gc.0.len(),
            _ => 1,
        }
    }

    /// All vertices in traversal order: polygon exteriors precede their holes.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(self.num_coordinates());
        self.collect_coordinates(&mut out);
        out
    }

    fn collect_coordinates(&self, out: &mut Vec<Coordinate>) {
        match self {
            Geometry::Point(p) => out.extend(p.coord),
            Geometry::LineString(ls) => out.extend_from_slice(&ls.coords),
            Geometry::LinearRing(lr) => out.extend_from_slice(lr.coords()),
            Geometry::Polygon(p) => {
                for ring in p.rings() {
                    out.extend_from_slice(ring.coords());
                }
            }
            Geometry::MultiPoint(mp) => out.extend(mp.0.iter().filter_map(|p| p.coord)),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    out.extend_from_slice(&ls.coords);
                }
            }
            Geometry::MultiPolygon(mp) => {
                for p in &mp.0 {
                    for ring in p.rings() {
                        out.extend_from_slice(ring.coords());
                    }
                }
            }
            Geometry::GeometryCollection(gc) => {
                for g in &gc.0 {
                    g.collect_coordinates(out);
                }
            }
        }
    }

    pub fn num_coordinates(&self) -> usize {
        match self {
            Geometry::Point(p) => usize::from(p.coord.is_some()),
            Geometry::LineString(ls) => ls.coords.len(),
            Geometry::LinearRing(lr) => lr.coords().len(),
            Geometry::Polygon(p) => p.rings().map(|r| r.coords().len()).sum(),
            Geometry::MultiPoint(mp) => mp.0.iter().filter(|p| p.coord.is_some()).count(),
            Geometry::MultiLineString(mls) => mls.0.iter().map(|ls| ls.coords.len()).sum(),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .map(|p| p.rings().map(|r| r.coords().len()).sum::<usize>())
                .sum(),
            Geometry::GeometryCollection(gc) => gc.0.iter().map(Geometry::num_coordinates).sum(),
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(p) => Envelope::from_coords(p.coord.iter()),
            Geometry::LineString(ls) => Envelope::from_coords(&ls.coords),
            Geometry::LinearRing(lr) => lr.envelope(),
            // holes lie inside the exterior
            Geometry::Polygon(p) => p.exterior.envelope(),
            Geometry::MultiPoint(mp) => Envelope::from_coords(mp.0.iter().filter_map(|p| p.coord.as_ref())),
            Geometry::MultiLineString(mls) => {
                Envelope::from_coords(mls.0.iter().flat_map(|ls| ls.coords.iter()))
            }
            Geometry::MultiPolygon(mp) => {
                Envelope::from_coords(mp.0.iter().flat_map(|p| p.exterior.coords().iter()))
            }
            Geometry::GeometryCollection(gc) => {
                let mut env = Envelope::null();
                for g in &gc.0 {
                    env.expand_to_include_envelope(&g.envelope());
                }
                env
            }
        }
    }

    /// Enclosed area; zero for puntal and lineal geometries.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiPolygon(mp) => mp.0.iter().map(Polygon::area).sum(),
            Geometry::GeometryCollection(gc) => gc.0.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }

    /// Line length, or ring perimeter for polygonal geometries.
    pub fn length(&self) -> f64 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
            Geometry::LineString(ls) => ls.length(),
            Geometry::LinearRing(lr) => lr.length(),
            Geometry::Polygon(p) => p.length(),
            Geometry::MultiLineString(mls) => mls.0.iter().map(LineString::length).sum(),
            Geometry::MultiPolygon(mp) => mp.0.iter().map(Polygon::length).sum(),
            Geometry::GeometryCollection(gc) => gc.0.iter().map(Geometry::length).sum(),
        }
    }

    /// `true` if any vertex carries an elevation.
    pub fn has_z(&self) -> bool {
        self.coordinates().iter().any(|c| c.z.is_some())
    }

    /// Rejects geometries with non-finite planar ordinates.
    pub fn validate_coordinates(&self) -> Result<()> {
        match self.coordinates().iter().find(|c| !c.is_finite()) {
            Some(c) => Err(Error::InvalidGeometry(format!(
                "{} has a non-finite coordinate {}",
                self.geometry_type(),
                c
            ))),
            None => Ok(()),
        }
    }

    /// Empty geometry of the variant matching a dimension.
    pub fn empty_of_dimension(dim: Dimension) -> Geometry {
        match dim {
            Dimension::Point => Geometry::Point(Point::empty()),
            Dimension::Line => Geometry::LineString(LineString::empty()),
            Dimension::Area => Geometry::Polygon(Polygon::empty()),
            Dimension::False => Geometry::GeometryCollection(GeometryCollection::default()),
        }
    }
}

impl From<Point> for Geometry {
    fn from(g: Point) -> Self {
        Geometry::Point(g)
    }
}

impl From<LineString> for Geometry {
    fn from(g: LineString) -> Self {
        Geometry::LineString(g)
    }
}

impl From<LinearRing> for Geometry {
    fn from(g: LinearRing) -> Self {
        Geometry::LinearRing(g)
    }
}

impl From<Polygon> for Geometry {
    fn from(g: Polygon) -> Self {
        Geometry::Polygon(g)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(g: MultiPoint) -> Self {
        Geometry::MultiPoint(g)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(g: MultiLineString) -> Self {
        Geometry::MultiLineString(g)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(g: MultiPolygon) -> Self {
        Geometry::MultiPolygon(g)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(g: GeometryCollection) -> Self {
        Geometry::GeometryCollection(g)
    }
}

/// Packs a list of geometries into the most specific single geometry.
///
/// One element is returned as is; several elements of one atomic type become
/// the matching multi-type; anything else becomes a collection.
pub fn build_geometry(mut geoms: Vec<Geometry>) -> Geometry {
    if geoms.is_empty() {
        return Geometry::GeometryCollection(GeometryCollection::default());
    }
    if geoms.len() == 1 {
        if let Some(g) = geoms.pop() {
            return g;
        }
    }

    let first = geoms[0].geometry_type();
    let homogeneous = geoms.iter().all(|g| g.geometry_type() == first);
    if !homogeneous {
        return Geometry::GeometryCollection(GeometryCollection(geoms));
    }

    match first {
        GeometryType::Point => Geometry::MultiPoint(MultiPoint(
            geoms
                .into_iter()
                .filter_map(|g| match g {
                    Geometry::Point(p) => Some(p),
                    _ => None,
                })
                .collect(),
        )),
        GeometryType::LineString => Geometry::MultiLineString(MultiLineString(
            geoms
                .into_iter()
                .filter_map(|g| match g {
                    Geometry::LineString(ls) => Some(ls),
                    _ => None,
                })
                .collect(),
        )),
        GeometryType::Polygon => Geometry::MultiPolygon(MultiPolygon(
            geoms
                .into_iter()
                .filter_map(|g| match g {
                    Geometry::Polygon(p) => Some(p),
                    _ => None,
                })
                .collect(),
        )),
        _ => Geometry::GeometryCollection(GeometryCollection(geoms)),
    }
}
