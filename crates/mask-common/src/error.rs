//! Error types for grid and labeled-array construction.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid grid dimension: {0}")]
    InvalidDimension(String),

    #[error("Invalid grid step: {0}")]
    InvalidStep(String),

    #[error("Invalid grid extent: {0}")]
    InvalidExtent(String),

    #[error("Array shape {actual:?} does not match coordinate lengths {expected:?} (latitude, longitude)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}
