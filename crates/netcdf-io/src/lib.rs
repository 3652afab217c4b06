//! NetCDF-4 persistence for region masks.
//!
//! Masks are written as a single `(latitude, longitude)` variable with CF
//! coordinate variables, and can be read back as labeled arrays for plotting.
//!
//! # Example
//!
//! ```ignore
//! use netcdf_io::{write_mask, read_mask, DatasetMetadata};
//!
//! write_mask("mask.nc", "AREA", &lat, &lon, &mask, &DatasetMetadata::default())?;
//! let back = read_mask("mask.nc", "AREA")?;
//! assert_eq!(back, mask);
//! ```

pub mod error;
pub mod native;
pub mod reader;
pub mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use reader::{read_labeled_array, read_mask};
pub use writer::{write_labeled_mask, write_mask, DatasetMetadata};
