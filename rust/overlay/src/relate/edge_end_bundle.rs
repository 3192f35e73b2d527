// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge ends grouped by direction around a relate node.

use geo_lite_core::{BoundaryNodeRule, Coordinate, Geometry, IntersectionMatrix, Location};
use geo_lite_topology::edge::update_im;
use geo_lite_topology::{compute_star_labelling, EdgeEnd, Label, Position, Result};

/// Edge ends leaving a node in the same direction. They may come from
/// either input and from several components of one input.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle {
    ends: Vec<EdgeEnd>,
    pub label: Label,
}

impl EdgeEndBundle {
    fn new(end: EdgeEnd) -> Self {
        Self {
            ends: vec![end],
            label: Label::default(),
        }
    }

    fn direction(&self) -> &EdgeEnd {
        &self.ends[0]
    }

    pub fn ends(&self) -> &[EdgeEnd] {
        &self.ends
    }

    /// Summarises the bundled labels. Several boundary ends of one input
    /// meeting here are resolved with the boundary node rule.
    pub fn compute_label(&mut self, rule: BoundaryNodeRule) {
        let is_area = self.ends.iter().any(|e| e.label.is_area());
        self.label = if is_area {
            Label::new_area(None, None, None)
        } else {
            Label::new_line(None)
        };
        for i in 0..2 {
            self.compute_label_on(i, rule);
            if is_area {
                self.compute_label_side(i, Position::Left);
                self.compute_label_side(i, Position::Right);
            }
        }
    }

    fn compute_label_on(&mut self, geom_index: usize, rule: BoundaryNodeRule) {
        let mut boundary_count = 0;
        let mut found_interior = false;
        for end in &self.ends {
            match end.label.location_on(geom_index) {
                Some(Location::Boundary) => boundary_count += 1,
                Some(Location::Interior) => found_interior = true,
                _ => {}
            }
        }
        let loc = if boundary_count > 0 {
            if rule.is_in_boundary(boundary_count) {
                Some(Location::Boundary)
            } else {
                Some(Location::Interior)
            }
        } else if found_interior {
            Some(Location::Interior)
        } else {
            None
        };
        self.label.set_location_on(geom_index, loc);
    }

    /// Interior on a side wins over exterior.
    fn compute_label_side(&mut self, geom_index: usize, side: Position) {
        for end in self.ends.iter().filter(|e| e.label.is_area()) {
            match end.label.location(geom_index, side) {
                Some(Location::Interior) => {
                    self.label.set_location(geom_index, side, Some(Location::Interior));
                    return;
                }
                Some(Location::Exterior) => {
                    self.label.set_location(geom_index, side, Some(Location::Exterior));
                }
                _ => {}
            }
        }
    }
}

/// The bundles of one node, in counter-clockwise order.
#[derive(Debug, Clone, Default)]
pub struct EdgeEndBundleStar {
    bundles: Vec<EdgeEndBundle>,
}

impl EdgeEndBundleStar {
    /// Adds an edge end to the bundle with its direction, creating one if
    /// needed.
    pub fn insert(&mut self, end: EdgeEnd) {
        match self
            .bundles
            .binary_search_by(|b| b.direction().compare_direction(&end))
        {
            Ok(i) => self.bundles[i].ends.push(end),
            Err(i) => self.bundles.insert(i, EdgeEndBundle::new(end)),
        }
    }

    pub fn bundles(&self) -> &[EdgeEndBundle] {
        &self.bundles
    }

    pub fn degree(&self) -> usize {
        self.bundles.len()
    }

    pub fn compute_labelling(&mut self, coord: Coordinate, args: [&Geometry; 2], rule: BoundaryNodeRule) -> Result<()> {
        for bundle in &mut self.bundles {
            bundle.compute_label(rule);
        }
        let mut labels: Vec<Label> = self.bundles.iter().map(|b| b.label).collect();
        compute_star_labelling(&mut labels, coord, args)?;
        for (bundle, label) in self.bundles.iter_mut().zip(labels) {
            bundle.label = label;
        }
        Ok(())
    }

    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        for bundle in &self.bundles {
            update_im(&bundle.label, im);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::{Boundary, Interior};

    fn end(x: f64, y: f64, label: Label) -> EdgeEnd {
        EdgeEnd::new(Coordinate::new(0.0, 0.0), Coordinate::new(x, y), label)
    }

    #[test]
    fn ends_with_one_direction_share_a_bundle() {
        let mut star = EdgeEndBundleStar::default();
        star.insert(end(1.0, 0.0, Label::for_geometry(0, Interior)));
        star.insert(end(0.0, 1.0, Label::for_geometry(0, Interior)));
        star.insert(end(2.0, 0.0, Label::for_geometry(1, Interior)));
        assert_eq!(star.degree(), 2);
        assert_eq!(star.bundles()[0].ends().len(), 2);
    }

    #[test]
    fn boundary_count_follows_the_rule() {
        let mut bundle = EdgeEndBundle::new(end(1.0, 0.0, Label::for_geometry(0, Boundary)));
        bundle.ends.push(end(1.0, 0.0, Label::for_geometry(0, Boundary)));

        bundle.compute_label(BoundaryNodeRule::Mod2);
        assert_eq!(bundle.label.location_on(0), Some(Interior));
        bundle.compute_label(BoundaryNodeRule::EndPoint);
        assert_eq!(bundle.label.location_on(0), Some(Boundary));
        assert_eq!(bundle.label.location_on(1), None);
    }
}
