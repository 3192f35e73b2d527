// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology graph operations.

use geo_lite_core::Coordinate;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or labelling a topology graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The graph is topologically inconsistent. Usually caused by numeric
    /// robustness problems; callers may retry on snapped input.
    #[error("topology error: {message}{}", at(.coordinate))]
    Topology {
        message: String,
        coordinate: Option<Coordinate>,
    },

    /// The computation was cancelled through an interrupt handle.
    #[error("operation interrupted")]
    Interrupted,

    /// Invalid input geometry or argument.
    #[error(transparent)]
    Core(#[from] geo_lite_core::Error),
}

fn at(coordinate: &Option<Coordinate>) -> String {
    match coordinate {
        Some(c) => format!(" at {}", c),
        None => String::new(),
    }
}

impl Error {
    pub fn topology(message: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Error::Topology {
            message: message.into(),
            coordinate,
        }
    }

    /// `true` for topology failures, the point where a caller could retry
    /// with snapped coordinates.
    pub fn is_topology(&self) -> bool {
        matches!(self, Error::Topology { .. })
    }
}
