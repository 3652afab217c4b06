//! Error types for NetCDF dataset operations.

use std::path::PathBuf;

use mask_common::GridError;
use thiserror::Error;

/// Result type for NetCDF operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading and writing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// Error reported by the netCDF library
    #[error("NetCDF error on {path}: {source}")]
    Library {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    /// Missing required variable, dimension or coordinate
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Mask and coordinate axes disagree
    #[error(transparent)]
    Shape(#[from] GridError),
}

impl NetCdfError {
    pub(crate) fn library(path: &std::path::Path) -> impl FnOnce(netcdf::Error) -> Self + '_ {
        move |source| Self::Library {
            path: path.to_path_buf(),
            source,
        }
    }
}
