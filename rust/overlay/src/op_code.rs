// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay operation codes and the result selection rule.

use std::fmt;

use geo_lite_core::{Dimension, Location};
use geo_lite_topology::Label;

/// The set-theoretic operation computed by an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OpCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpCode::Intersection => "intersection",
            OpCode::Union => "union",
            OpCode::Difference => "difference",
            OpCode::SymDifference => "symdifference",
        }
    }

    /// Dimension of an empty result for inputs of dimension `dim0` and
    /// `dim1`.
    pub fn result_dimension(self, dim0: Dimension, dim1: Dimension) -> Dimension {
        match self {
            OpCode::Intersection => dim0.min(dim1),
            OpCode::Union | OpCode::SymDifference => dim0.max(dim1),
            OpCode::Difference => dim0,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a component with locations `loc0` and `loc1` relative to
/// the two inputs belongs to the result of `op`. Boundary counts as interior.
pub fn is_result_of_op(loc0: Option<Location>, loc1: Option<Location>, op: OpCode) -> bool {
    let in0 = matches!(loc0, Some(Location::Interior | Location::Boundary));
    let in1 = matches!(loc1, Some(Location::Interior | Location::Boundary));
    match op {
        OpCode::Intersection => in0 && in1,
        OpCode::Union => in0 || in1,
        OpCode::Difference => in0 && !in1,
        OpCode::SymDifference => in0 != in1,
    }
}

/// Result selection on the `On` locations of a label.
pub fn is_label_result_of_op(label: &Label, op: OpCode) -> bool {
    is_result_of_op(label.location_on(0), label.location_on(1), op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::{Boundary, Exterior, Interior};

    #[test]
    fn selection_table() {
        let cases = [
            (Some(Interior), Some(Interior), [true, true, false, false]),
            (Some(Interior), Some(Exterior), [false, true, true, true]),
            (Some(Exterior), Some(Boundary), [false, true, false, true]),
            (Some(Exterior), Some(Exterior), [false, false, false, false]),
            (Some(Boundary), None, [false, true, true, true]),
        ];
        let ops = [OpCode::Intersection, OpCode::Union, OpCode::Difference, OpCode::SymDifference];
        for (loc0, loc1, expected) in cases {
            for (op, want) in ops.iter().zip(expected) {
                assert_eq!(is_result_of_op(loc0, loc1, *op), want, "{op} {loc0:?} {loc1:?}");
            }
        }
    }

    #[test]
    fn empty_result_dimension() {
        use Dimension::{Area, Line, Point};
        assert_eq!(OpCode::Intersection.result_dimension(Area, Line), Line);
        assert_eq!(OpCode::Union.result_dimension(Point, Area), Area);
        assert_eq!(OpCode::SymDifference.result_dimension(Line, Point), Line);
        assert_eq!(OpCode::Difference.result_dimension(Point, Area), Point);
    }
}
