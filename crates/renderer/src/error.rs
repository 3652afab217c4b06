//! Error types for rendering.

use std::path::PathBuf;

use netcdf_io::NetCdfError;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Invalid plot input: {0}")]
    InvalidInput(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to read overlay {path}: {reason}")]
    Overlay { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dataset(#[from] NetCdfError),
}
