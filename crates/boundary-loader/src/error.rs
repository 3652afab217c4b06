//! Error types for boundary loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for boundary loader operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;

#[derive(Error, Debug)]
pub enum BoundaryError {
    /// Boundary file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a GeoJSON document
    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    /// Geometry coordinates cannot be interpreted
    #[error("malformed geometry in feature {feature}: {reason}")]
    MalformedGeometry { feature: usize, reason: String },

    /// The legacy `crs` member is present but unusable
    #[error("invalid crs member: {0}")]
    InvalidCrs(String),

    /// No transformation to WGS84 for the declared CRS
    #[error(transparent)]
    Projection(#[from] projection::ProjectionError),
}
