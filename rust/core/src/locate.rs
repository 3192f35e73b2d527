// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point location against whole geometries.

use crate::algorithm::{is_on_line, locate_in_ring};
use crate::coord::Coordinate;
use crate::envelope::Envelope;
use crate::geometry::{Geometry, LineString, LinearRing, Polygon};
use crate::location::Location;

/// Decides which line endpoints form the boundary of a lineal geometry,
/// given how many component endpoints meet at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryNodeRule {
    /// Odd number of endpoints (OGC SFS default).
    #[default]
    Mod2,
    /// Any endpoint.
    EndPoint,
    /// More than one endpoint.
    MultivalentEndPoint,
    /// Exactly one endpoint.
    MonovalentEndPoint,
}

impl BoundaryNodeRule {
    pub fn is_in_boundary(self, boundary_count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => boundary_count % 2 == 1,
            BoundaryNodeRule::EndPoint => boundary_count > 0,
            BoundaryNodeRule::MultivalentEndPoint => boundary_count > 1,
            BoundaryNodeRule::MonovalentEndPoint => boundary_count == 1,
        }
    }
}

/// Locates points against any geometry, honouring a boundary node rule.
///
/// Collections are treated as the union of their components, with the
/// boundary rule deciding points where several component boundaries meet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointLocator {
    rule: BoundaryNodeRule,
}

#[derive(Default)]
struct LocationTally {
    is_in: bool,
    boundary_count: usize,
}

impl LocationTally {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundary_count += 1,
            Location::Exterior => {}
        }
    }
}

impl PointLocator {
    pub fn new(rule: BoundaryNodeRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> BoundaryNodeRule {
        self.rule
    }

    /// `true` unless the point is in the exterior.
    pub fn intersects(&self, p: &Coordinate, geom: &Geometry) -> bool {
        self.locate(p, geom) != Location::Exterior
    }

    pub fn locate(&self, p: &Coordinate, geom: &Geometry) -> Location {
        if geom.is_empty() {
            return Location::Exterior;
        }
        match geom {
            Geometry::LineString(ls) => return locate_on_line_string(p, ls),
            Geometry::LinearRing(lr) => return locate_on_linear_ring(p, lr),
            Geometry::Polygon(poly) => return locate_in_polygon(p, poly),
            _ => {}
        }

        let mut tally = LocationTally::default();
        compute_location(p, geom, &mut tally);
        if self.rule.is_in_boundary(tally.boundary_count) {
            return Location::Boundary;
        }
        if tally.boundary_count > 0 || tally.is_in {
            return Location::Interior;
        }
        Location::Exterior
    }
}

fn compute_location(p: &Coordinate, geom: &Geometry, tally: &mut LocationTally) {
    match geom {
        Geometry::Point(pt) => tally.update(locate_on_point(p, pt.coord.as_ref())),
        Geometry::LineString(ls) => tally.update(locate_on_line_string(p, ls)),
        Geometry::LinearRing(lr) => tally.update(locate_on_linear_ring(p, lr)),
        Geometry::Polygon(poly) => tally.update(locate_in_polygon(p, poly)),
        Geometry::MultiPoint(mp) => {
            for pt in &mp.0 {
                tally.update(locate_on_point(p, pt.coord.as_ref()));
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                tally.update(locate_on_line_string(p, ls));
            }
        }
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                tally.update(locate_in_polygon(p, poly));
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                compute_location(p, g, tally);
            }
        }
    }
}

fn locate_on_point(p: &Coordinate, pt: Option<&Coordinate>) -> Location {
    match pt {
        Some(c) if c.equals_2d(p) => Location::Interior,
        _ => Location::Exterior,
    }
}

fn locate_on_line_string(p: &Coordinate, ls: &LineString) -> Location {
    if ls.is_empty() || !Envelope::from_coords(&ls.coords).intersects_coord(p) {
        return Location::Exterior;
    }
    let pts = &ls.coords;
    if !ls.is_closed() && (p.equals_2d(&pts[0]) || p.equals_2d(&pts[pts.len() - 1])) {
        return Location::Boundary;
    }
    if is_on_line(p, pts) {
        return Location::Interior;
    }
    Location::Exterior
}

fn locate_on_linear_ring(p: &Coordinate, lr: &LinearRing) -> Location {
    // closed, so it has no boundary
    if !lr.envelope().intersects_coord(p) {
        return Location::Exterior;
    }
    if is_on_line(p, lr.coords()) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_polygon_ring(p: &Coordinate, ring: &LinearRing) -> Location {
    if !ring.envelope().intersects_coord(p) {
        return Location::Exterior;
    }
    locate_in_ring(p, ring.coords())
}

/// Location of `p` relative to a single polygon.
pub fn locate_in_polygon(p: &Coordinate, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    match locate_in_polygon_ring(p, &poly.exterior) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        Location::Interior => {}
    }
    for hole in &poly.interiors {
        match locate_in_polygon_ring(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

/// Locates `p` against the polygonal components of `geom` only.
///
/// Lines and points are ignored. The first component that does not report
/// the exterior decides.
pub fn locate_in_area(p: &Coordinate, geom: &Geometry) -> Location {
    if geom.is_empty() || !geom.envelope().intersects_coord(p) {
        return Location::Exterior;
    }
    locate_in_area_components(p, geom)
}

fn locate_in_area_components(p: &Coordinate, geom: &Geometry) -> Location {
    match geom {
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .map(|poly| locate_in_polygon(p, poly))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::GeometryCollection(gc) => gc
            .0
            .iter()
            .map(|g| locate_in_area_components(p, g))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        _ => Location::Exterior,
    }
}

/// Tests whether a geometry has a non-empty boundary under `rule`.
pub fn has_boundary(geom: &Geometry, rule: BoundaryNodeRule) -> bool {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::LinearRing(_) => false,
        Geometry::Polygon(p) => !p.is_empty(),
        Geometry::MultiPolygon(mp) => mp.0.iter().any(|p| !p.is_empty()),
        Geometry::LineString(ls) => endpoint_boundary_exists(std::slice::from_ref(ls), rule),
        Geometry::MultiLineString(mls) => endpoint_boundary_exists(&mls.0, rule),
        Geometry::GeometryCollection(gc) => gc.0.iter().any(|g| has_boundary(g, rule)),
    }
}

fn endpoint_boundary_exists(lines: &[LineString], rule: BoundaryNodeRule) -> bool {
    let mut counts: std::collections::BTreeMap<crate::coord::CoordKey, usize> = Default::default();
    for ls in lines.iter().filter(|ls| !ls.is_empty()) {
        let first = &ls.coords[0];
        let last = &ls.coords[ls.coords.len() - 1];
        *counts.entry(first.key()).or_default() += 1;
        *counts.entry(last.key()).or_default() += 1;
    }
    counts.values().any(|&n| rule.is_in_boundary(n))
}
