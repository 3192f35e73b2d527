// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label completion around a node.
//!
//! Both node stars (the directed-edge star of the overlay graph and the
//! bundle star used by relate) complete their labels the same way, so the
//! logic lives here and works on the labels in counter-clockwise order.

use geo_lite_core::{locate_in_area, Coordinate, Geometry, Location};

use crate::error::{Error, Result};
use crate::label::Label;
use crate::position::Position;

/// Completes the labels of the edge ends around the node at `coord`.
///
/// Side locations are propagated around the star first. Locations still
/// missing afterwards are found by locating the node in the corresponding
/// input, except where a line end lies on a collapsed area boundary, which
/// is treated as exterior.
pub fn compute_star_labelling(labels: &mut [Label], coord: Coordinate, args: [&Geometry; 2]) -> Result<()> {
    for geom_index in 0..2 {
        propagate_side_labels(labels, geom_index, coord)?;
    }

    let mut has_dimensional_collapse = [false; 2];
    for label in labels.iter() {
        for (i, collapsed) in has_dimensional_collapse.iter_mut().enumerate() {
            if label.is_line(i) && label.location_on(i) == Some(Location::Boundary) {
                *collapsed = true;
            }
        }
    }

    let mut located: [Option<Location>; 2] = [None; 2];
    for label in labels.iter_mut() {
        for i in 0..2 {
            if !label.is_any_null(i) {
                continue;
            }
            let loc = if has_dimensional_collapse[i] {
                Location::Exterior
            } else {
                *located[i].get_or_insert_with(|| locate_in_area(&coord, args[i]))
            };
            label.set_all_locations_if_null(i, Some(loc));
        }
    }
    Ok(())
}

/// Walks the star carrying the current side location of one geometry,
/// filling unknown sides and checking known ones for consistency.
fn propagate_side_labels(labels: &mut [Label], geom_index: usize, coord: Coordinate) -> Result<()> {
    // Left of the last area end is the location entering the first one.
    let mut start_loc = None;
    for label in labels.iter() {
        if label.is_area_of(geom_index) {
            if let Some(left) = label.location(geom_index, Position::Left) {
                start_loc = Some(left);
            }
        }
    }
    let Some(mut curr_loc) = start_loc else {
        return Ok(());
    };

    for label in labels.iter_mut() {
        if label.location_on(geom_index).is_none() {
            label.set_location_on(geom_index, Some(curr_loc));
        }
        if !label.is_area_of(geom_index) {
            continue;
        }
        let left = label.location(geom_index, Position::Left);
        match label.location(geom_index, Position::Right) {
            Some(right) => {
                if right != curr_loc {
                    return Err(Error::topology("side location conflict", Some(coord)));
                }
                let Some(left) = left else {
                    return Err(Error::topology("found single null side", Some(coord)));
                };
                curr_loc = left;
            }
            None => {
                label.set_location(geom_index, Position::Right, Some(curr_loc));
                label.set_location(geom_index, Position::Left, Some(curr_loc));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_lite_core::{LineString, Polygon};
    use Location::{Boundary, Exterior, Interior};

    fn square() -> Geometry {
        Polygon::new(
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)].try_into().unwrap(),
            vec![],
        )
        .into()
    }

    fn line() -> Geometry {
        LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]).into()
    }

    #[test]
    fn sides_propagate_to_unlabelled_area_ends() {
        // Two boundary ends of geometry 0 with an unlabelled end between.
        let mut labels = vec![
            Label::for_geometry_area(0, Boundary, Interior, Exterior),
            Label::new_area(None, None, None),
            Label::for_geometry_area(0, Boundary, Exterior, Interior),
        ];
        let a = square();
        let b = line();
        compute_star_labelling(&mut labels, Coordinate::new(20.0, 20.0), [&a, &b]).unwrap();
        assert_eq!(labels[1].location(0, Position::Left), Some(Interior));
        assert_eq!(labels[1].location(0, Position::Right), Some(Interior));
        assert_eq!(labels[1].location_on(0), Some(Interior));
    }

    #[test]
    fn conflicting_sides_are_a_topology_error() {
        let mut labels = vec![
            Label::for_geometry_area(0, Boundary, Exterior, Interior),
            Label::for_geometry_area(0, Boundary, Exterior, Interior),
        ];
        let a = square();
        let b = line();
        let err = compute_star_labelling(&mut labels, Coordinate::new(0.0, 0.0), [&a, &b]).unwrap_err();
        assert!(err.is_topology());
    }

    #[test]
    fn missing_geometry_is_located_at_node() {
        let mut labels = vec![Label::for_geometry(1, Interior)];
        let a = square();
        let b = line();
        compute_star_labelling(&mut labels, Coordinate::new(5.0, 5.0), [&a, &b]).unwrap();
        assert_eq!(labels[0].location_on(0), Some(Interior));
    }

    #[test]
    fn collapsed_boundary_is_exterior() {
        let mut labels = vec![Label::for_geometry(0, Boundary), Label::for_geometry(1, Interior)];
        let a = square();
        let b = line();
        compute_star_labelling(&mut labels, Coordinate::new(5.0, 5.0), [&a, &b]).unwrap();
        assert_eq!(labels[1].location_on(0), Some(Exterior));
    }
}
