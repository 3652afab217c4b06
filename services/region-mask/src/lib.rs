//! Region mask pipeline.
//!
//! Loads a GeoJSON boundary, rasterizes it onto a lat/lon model grid and
//! writes the result as a NetCDF `AREA` mask, optionally followed by a
//! zoomed diagnostic plot.

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{build, plot_concentration_file, plot_mask_file, BuildOutcome};
