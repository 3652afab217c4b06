//! Error types for coordinate transformations.

use thiserror::Error;

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Error, Debug)]
pub enum ProjectionError {
    /// No transformation to WGS84 is known for this EPSG code
    #[error("unsupported coordinate reference system: EPSG:{0}")]
    UnsupportedCrs(u32),

    /// Input coordinate cannot be transformed (NaN, outside projection domain)
    #[error("coordinate ({x}, {y}) cannot be transformed: {reason}")]
    InvalidCoordinate { x: f64, y: f64, reason: String },
}
