//! Error types for coverage planning.

use thiserror::Error;

/// Errors that can occur while planning a coverage path.
///
/// Planning is all-or-nothing: when one of these is returned no rows were
/// produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    /// A precondition was violated (too few vertices, non-positive
    /// separation, non-finite angle, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The oriented bounding box could not be built: the area is collinear,
    /// collapsed to a point, or has no width along one of the sweep axes.
    #[error("Degenerate geometry: {0}")]
    GeometryDegenerate(String),
}

/// Errors from parsing `lat, lng, lat, lng, ...` area text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AreaParseError {
    #[error("No coordinates given")]
    Empty,

    /// Values come in lat/lng pairs.
    #[error("Need even number of values to interpret as lat/lng points (got {0})")]
    OddValueCount(usize),

    #[error("Need numerical values to interpret as lat/lng points (got '{0}')")]
    NotNumeric(String),
}

/// Result alias for planning operations.
pub type Result<T> = std::result::Result<T, CoverageError>;
