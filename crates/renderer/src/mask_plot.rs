//! Zoomed view of a mask around its nonzero cells.

use std::path::{Path, PathBuf};

use mask_common::{LabeledArray, AREA_VARIABLE};
use tracing::{info, warn};

use crate::colormap::Colormap;
use crate::decorations::{self, keywords};
use crate::error::{RenderError, RenderResult};
use crate::figure::Figure;
use crate::mesh::draw_mesh;
use crate::scale::ValueScale;
use crate::text::load_font;
use crate::viewport::Viewport;

/// Options for [`plot_zoomed_mask`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPlotOptions {
    /// Variable read by [`plot_dataset_mask`]
    pub variable: String,
    /// Degrees added on each side of the nonzero extent
    pub padding_lon: f64,
    pub padding_lat: f64,
    /// Defaults to `Zoomed View: {variable} Mask`
    pub title: Option<String>,
    pub colormap: String,
    /// Defaults to the variable name
    pub colorbar_label: Option<String>,
    pub width: u32,
    pub height: u32,
    /// TrueType font for figure text; system fonts are tried otherwise
    pub font: Option<PathBuf>,
}

impl Default for ZoomPlotOptions {
    fn default() -> Self {
        Self {
            variable: AREA_VARIABLE.to_string(),
            padding_lon: 0.2,
            padding_lat: 0.1,
            title: None,
            colormap: "Greens".to_string(),
            colorbar_label: None,
            width: 800,
            height: 600,
            font: None,
        }
    }
}

impl ZoomPlotOptions {
    /// The `AREA` mask view: 0.5 degree padding on both axes, `Blues`.
    pub fn area_mask(title: &str, padding: f64) -> Self {
        Self {
            padding_lon: padding,
            padding_lat: padding,
            title: Some(title.to_string()),
            colormap: "Blues".to_string(),
            colorbar_label: Some(format!("{} value", AREA_VARIABLE)),
            ..Self::default()
        }
    }
}

/// Render `field` zoomed to the padded extent of its nonzero cells.
///
/// Returns `Ok(None)` without rendering when no cell is nonzero.
pub fn plot_zoomed_mask(
    field: &LabeledArray<f64>,
    options: &ZoomPlotOptions,
) -> RenderResult<Option<Figure>> {
    let variable = field.name();
    let Some(extent) = field.nonzero_extent() else {
        warn!(variable, "No nonzero {} values to plot", variable);
        return Ok(None);
    };

    if !(options.padding_lon >= 0.0 && options.padding_lat >= 0.0) {
        return Err(RenderError::InvalidInput(format!(
            "padding must be non-negative, got lon={} lat={}",
            options.padding_lon, options.padding_lat
        )));
    }
    let mut view = extent.expand(options.padding_lon, options.padding_lat);

    // A single row or column of cells without padding still gets one cell of width
    if view.width() <= 0.0 {
        view = view.expand(half_spacing(field.longitude()), 0.0);
    }
    if view.height() <= 0.0 {
        view = view.expand(0.0, half_spacing(field.latitude()));
    }

    let colormap = Colormap::by_name(&options.colormap)?;
    let scale = ValueScale::linear(field.values().iter()).ok_or_else(|| {
        RenderError::InvalidInput(format!("variable {} has no finite values", variable))
    })?;

    let mut figure =
        Figure::new(options.width, options.height)?.with_font(load_font(options.font.as_deref()));
    let plot = figure.plot_area();
    let viewport = Viewport::new(view, plot);

    let painted = draw_mesh(&mut figure, &viewport, field, &colormap, &scale);
    decorations::draw_gridlines(&mut figure, &viewport);
    decorations::draw_frame(&mut figure, &plot);

    let bar = figure.colorbar_area(&plot);
    let label = options.colorbar_label.as_deref().unwrap_or(variable);
    decorations::draw_colorbar(&mut figure, &bar, &colormap, &scale, label);

    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Zoomed View: {} Mask", variable));
    decorations::draw_titles(&mut figure, &plot, &title, Some("Longitude"), Some("Latitude"));
    figure.set_text(keywords::EXTENT, format_extent(&view.to_extent()));
    figure.set_text(keywords::SOFTWARE, concat!("region-mask ", env!("CARGO_PKG_VERSION")));

    info!(
        variable,
        west = view.min_x,
        east = view.max_x,
        south = view.min_y,
        north = view.max_y,
        pixels = painted,
        "Rendered zoomed mask"
    );
    Ok(Some(figure))
}

/// Plot an `AREA` mask zoomed to its nonzero extent, padded by `padding`
/// degrees on each side.
pub fn plot_area_mask(
    field: &LabeledArray<f64>,
    title: &str,
    padding: f64,
) -> RenderResult<Option<Figure>> {
    plot_zoomed_mask(field, &ZoomPlotOptions::area_mask(title, padding))
}

/// Read `options.variable` from a NetCDF file and render the zoomed view.
pub fn plot_dataset_mask(
    path: impl AsRef<Path>,
    options: &ZoomPlotOptions,
) -> RenderResult<Option<Figure>> {
    let field = netcdf_io::read_labeled_array(path, &options.variable)?;
    plot_zoomed_mask(&field, options)
}

/// Half the spacing of a regular axis, or half a degree for a single value.
fn half_spacing(axis: &[f64]) -> f64 {
    match axis {
        [a, b, ..] if (b - a).abs() > 0.0 => (b - a).abs() / 2.0,
        _ => 0.5,
    }
}

pub(crate) fn format_extent(extent: &[f64; 4]) -> String {
    extent
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
