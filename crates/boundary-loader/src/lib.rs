//! Boundary loading for region masks.
//!
//! Reads a GeoJSON boundary document and produces a set of simple,
//! single-part polygons in geographic WGS84:
//!
//! 1. every feature geometry is repaired (null geometries pass through),
//! 2. multi-part geometries are split into one row per polygon, keeping the
//!    feature's properties,
//! 3. anything still invalid is dropped,
//! 4. coordinates are reprojected from the declared CRS (WGS84 if none).
//!
//! ```ignore
//! use boundary_loader::load_boundaries;
//!
//! let set = load_boundaries("eer.geojson")?;
//! println!("{}", set.report());
//! ```

pub mod convert;
pub mod error;
pub mod export;
pub mod loader;
pub mod repair;
pub mod reproject;
pub mod validity;

pub use error::{BoundaryError, BoundaryResult};
pub use export::{to_feature_collection, write_geojson};
pub use loader::{
    load_boundaries, load_boundaries_str, BoundaryFeature, BoundaryLoader, BoundarySet, LoadReport,
};
pub use validity::{check_polygon, is_valid, Invalidity};
