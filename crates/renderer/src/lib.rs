//! Diagnostic figures for region masks and concentration fields.
//!
//! Two figures are provided:
//! - [`plot_zoomed_mask`]: a mask zoomed to its nonzero cells
//! - [`plot_concentration_map`]: a field over a fixed extent with coastline
//!   and border overlays, built in or loaded from GeoJSON
//!
//! Figures are rasterized into an RGBA canvas and written as PNG, with the
//! title and labels stored in PNG text chunks.

pub mod basemap;
pub mod colormap;
pub mod concentration_map;
pub mod decorations;
pub mod error;
pub mod figure;
pub mod mask_plot;
pub mod mesh;
pub mod overlay;
pub mod png;
pub mod scale;
pub mod text;
pub mod viewport;

pub use colormap::{Color, Colormap};
pub use concentration_map::{plot_concentration_map, ConcentrationMapOptions, UK_EXTENT};
pub use error::{RenderError, RenderResult};
pub use figure::Figure;
pub use mask_plot::{plot_area_mask, plot_dataset_mask, plot_zoomed_mask, ZoomPlotOptions};
pub use overlay::OverlayLayer;
