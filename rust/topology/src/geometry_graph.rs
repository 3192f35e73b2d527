// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The topology graph of a single input geometry.
//!
//! Every linear component becomes an edge labelled with its location
//! relative to the geometry; significant points (ring starts, line
//! endpoints, isolated points and self-intersections) become nodes.

use geo_lite_core::algorithm::is_ccw;
use geo_lite_core::{BoundaryNodeRule, CoordKey, Coordinate, Envelope, Geometry, LinearRing, Location, Polygon};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::edge::Edge;
use crate::error::Result;
use crate::label::Label;
use crate::node::NodeMap;
use crate::noding::{compute_intersections, SegmentIntersector, SweepMode};

#[derive(Debug)]
pub struct GeometryGraph<'a> {
    arg_index: usize,
    geometry: &'a Geometry,
    rule: BoundaryNodeRule,
    use_boundary_determination_rule: bool,
    edges: Vec<Edge>,
    pub nodes: NodeMap<()>,
    endpoint_counts: FxHashMap<CoordKey, usize>,
    has_too_few_points: bool,
    invalid_point: Option<Coordinate>,
}

impl<'a> GeometryGraph<'a> {
    /// Builds the graph of `geometry` as input `arg_index` (0 or 1).
    pub fn new(arg_index: usize, geometry: &'a Geometry, rule: BoundaryNodeRule) -> Result<Self> {
        let mut graph = Self {
            arg_index,
            geometry,
            rule,
            use_boundary_determination_rule: true,
            edges: Vec::new(),
            nodes: NodeMap::new(),
            endpoint_counts: FxHashMap::default(),
            has_too_few_points: false,
            invalid_point: None,
        };
        graph.add(geometry)?;
        debug!(
            arg = arg_index,
            edges = graph.edges.len(),
            nodes = graph.nodes.len(),
            "built geometry graph"
        );
        Ok(graph)
    }

    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Some ring or line had too few distinct points to form an edge.
    pub fn has_too_few_points(&self) -> bool {
        self.has_too_few_points
    }

    pub fn invalid_point(&self) -> Option<Coordinate> {
        self.invalid_point
    }

    /// Coordinates of nodes on the boundary of this geometry.
    pub fn boundary_nodes(&self) -> Vec<Coordinate> {
        self.nodes.boundary_nodes(self.arg_index)
    }

    fn add(&mut self, geometry: &Geometry) -> Result<()> {
        if geometry.is_empty() {
            return Ok(());
        }
        match geometry {
            Geometry::Point(p) => {
                if let Some(coord) = p.coord {
                    self.insert_point(coord, Location::Interior);
                }
            }
            Geometry::MultiPoint(mp) => {
                for coord in mp.0.iter().filter_map(|p| p.coord) {
                    self.insert_point(coord, Location::Interior);
                }
            }
            Geometry::LineString(ls) => self.add_line_string(&ls.coords),
            Geometry::LinearRing(lr) => self.add_line_string(lr.coords()),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    self.add_line_string(&ls.coords);
                }
            }
            Geometry::Polygon(poly) => self.add_polygon(poly)?,
            Geometry::MultiPolygon(mp) => {
                // the boundary of a multi-polygon is the union of its rings,
                // not the result of counting them
                self.use_boundary_determination_rule = false;
                for poly in &mp.0 {
                    self.add_polygon(poly)?;
                }
            }
            Geometry::GeometryCollection(gc) => {
                for g in &gc.0 {
                    self.add(g)?;
                }
            }
        }
        Ok(())
    }

    fn add_polygon(&mut self, poly: &Polygon) -> Result<()> {
        if poly.is_empty() {
            return Ok(());
        }
        self.add_polygon_ring(&poly.exterior, Location::Exterior, Location::Interior)?;
        for hole in &poly.interiors {
            // holes are labelled with the sides swapped
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior)?;
        }
        Ok(())
    }

    /// Adds a ring with the locations to its left and right when traversed
    /// clockwise.
    fn add_polygon_ring(&mut self, ring: &LinearRing, cw_left: Location, cw_right: Location) -> Result<()> {
        if ring.is_empty() {
            return Ok(());
        }
        let coords = remove_repeated_points(ring.coords());
        if coords.len() < 4 {
            self.has_too_few_points = true;
            self.invalid_point = coords.first().copied();
            warn!(arg = self.arg_index, points = coords.len(), "ring has too few distinct points, skipped");
            return Ok(());
        }
        let (left, right) = if is_ccw(&coords)? {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let start = coords[0];
        let label = Label::for_geometry_area(self.arg_index, Location::Boundary, left, right);
        self.edges.push(Edge::new(coords, label));
        self.insert_point(start, Location::Boundary);
        Ok(())
    }

    fn add_line_string(&mut self, coords: &[Coordinate]) {
        let coords = remove_repeated_points(coords);
        if coords.len() < 2 {
            self.has_too_few_points = true;
            self.invalid_point = coords.first().copied();
            warn!(arg = self.arg_index, "line has fewer than two distinct points, skipped");
            return;
        }
        let first = coords[0];
        let last = coords[coords.len() - 1];
        self.edges.push(Edge::new(coords, Label::for_geometry(self.arg_index, Location::Interior)));
        // endpoints are boundary points subject to the boundary node rule
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    fn insert_point(&mut self, coord: Coordinate, on: Location) {
        let key = self.nodes.add_node(coord);
        self.nodes[key].set_label(self.arg_index, Some(on));
    }

    /// Counts another endpoint at `coord` and applies the boundary node rule.
    fn insert_boundary_point(&mut self, coord: Coordinate) {
        let count = self.endpoint_counts.entry(coord.key()).or_default();
        *count += 1;
        let loc = if self.rule.is_in_boundary(*count) {
            Location::Boundary
        } else {
            Location::Interior
        };
        let key = self.nodes.add_node(coord);
        self.nodes[key].set_label(self.arg_index, Some(loc));
    }

    fn is_boundary_node(&self, coord: &Coordinate) -> bool {
        self.nodes
            .find(coord)
            .is_some_and(|k| self.nodes[k].label.location_on(self.arg_index) == Some(Location::Boundary))
    }

    /// Nodes the edges of this graph against each other.
    ///
    /// Rings of polygonal inputs are assumed valid, so only different rings
    /// are intersected unless `compute_ring_self_nodes` is set. Edges
    /// outside `env` are skipped.
    pub fn compute_self_nodes(&mut self, compute_ring_self_nodes: bool, env: Option<&Envelope>) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(true, false);
        let is_rings = matches!(
            self.geometry,
            Geometry::LinearRing(_) | Geometry::Polygon(_) | Geometry::MultiPolygon(_)
        );
        let mode = if compute_ring_self_nodes || !is_rings {
            SweepMode::AllSegments
        } else {
            SweepMode::DistinctEdges
        };
        compute_intersections(&[&self.edges[..]], env, mode, &mut si);
        si.apply_to(0, &mut self.edges);
        self.add_self_intersection_nodes();
        si
    }

    fn add_self_intersection_nodes(&mut self) {
        let mut found = Vec::new();
        for edge in &self.edges {
            let loc = edge.label.location_on(self.arg_index);
            found.extend(edge.ei_list.iter().map(|ei| (ei.coord, loc)));
        }
        for (coord, loc) in found {
            if self.is_boundary_node(&coord) {
                continue;
            }
            match loc {
                Some(Location::Boundary) if self.use_boundary_determination_rule => self.insert_boundary_point(coord),
                Some(loc) => self.insert_point(coord, loc),
                None => {}
            }
        }
    }

    /// Nodes the edges of this graph against those of `other`, recording
    /// intersections in both.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_>,
        include_proper: bool,
        env: Option<&Envelope>,
    ) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(include_proper, true);
        si.set_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());
        compute_intersections(&[&self.edges[..], &other.edges[..]], env, SweepMode::DistinctLists, &mut si);
        si.apply_to(0, &mut self.edges);
        si.apply_to(1, &mut other.edges);
        si
    }

    /// Splits every edge at its recorded intersections.
    pub fn compute_split_edges(&mut self) -> Vec<Edge> {
        let mut split = Vec::new();
        for edge in &mut self.edges {
            split.extend(edge.split_edges());
        }
        split
    }
}

fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().map_or(true, |last| !last.equals_2d(c)) {
            out.push(*c);
        }
    }
    out
}
