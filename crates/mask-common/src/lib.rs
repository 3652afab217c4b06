//! Common types and utilities shared across the region-mask crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod labeled;
pub mod mask;

pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{GridError, GridResult};
pub use grid::{presets, GridSpec, RowOrder};
pub use labeled::LabeledArray;
pub use mask::Mask;

/// Name of the mask variable written to and read from dataset files.
pub const AREA_VARIABLE: &str = "AREA";

/// Name of the latitude dimension and coordinate variable.
pub const LATITUDE: &str = "latitude";

/// Name of the longitude dimension and coordinate variable.
pub const LONGITUDE: &str = "longitude";
