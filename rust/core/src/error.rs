// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry construction and validation.

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the geometry model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The geometry contains coordinates that cannot take part in planar
    /// computations (NaN or infinite ordinates).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An argument is structurally unsuitable for the requested operation.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
}
