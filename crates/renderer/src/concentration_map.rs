//! Concentration maps over a fixed geographic extent.

use std::path::PathBuf;

use mask_common::{BoundingBox, LabeledArray};
use tracing::{info, warn};

use crate::basemap;
use crate::colormap::Colormap;
use crate::decorations::{self, keywords};
use crate::error::RenderResult;
use crate::figure::Figure;
use crate::mask_plot::format_extent;
use crate::mesh::draw_mesh;
use crate::overlay::OverlayLayer;
use crate::scale::ValueScale;
use crate::text::load_font;
use crate::viewport::Viewport;

/// UK-wide extent as `[west, east, south, north]`.
pub const UK_EXTENT: [f64; 4] = [-8.5, 2.5, 49.5, 60.0];

/// Options for [`plot_concentration_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationMapOptions {
    pub title: String,
    pub colormap: String,
    pub colorbar_label: String,
    pub extent: BoundingBox,
    pub width: u32,
    pub height: u32,
    /// Built-in coarse coastlines unless replaced; `None` draws none
    pub coastlines: Option<OverlayLayer>,
    pub borders: Option<OverlayLayer>,
    pub font: Option<PathBuf>,
}

impl Default for ConcentrationMapOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            colormap: "RdBu_r".to_string(),
            colorbar_label: "ΔConcentration (μg/m³)".to_string(),
            extent: BoundingBox::from_extent(UK_EXTENT),
            width: 800,
            height: 500,
            coastlines: Some(basemap::coastlines()),
            borders: Some(basemap::borders()),
            font: None,
        }
    }
}

/// Render a lat/lon field over `options.extent` in an equirectangular view.
///
/// Colour limits are symmetric about zero when the field changes sign.
pub fn plot_concentration_map(
    field: &LabeledArray<f64>,
    options: &ConcentrationMapOptions,
) -> RenderResult<Figure> {
    let colormap = Colormap::by_name(&options.colormap)?;
    let scale = ValueScale::diverging(field.values().iter()).unwrap_or_else(|| {
        warn!(variable = field.name(), "Field has no finite values");
        ValueScale::new(0.0, 1.0)
    });

    let mut figure =
        Figure::new(options.width, options.height)?.with_font(load_font(options.font.as_deref()));
    let plot = figure.plot_area();
    let viewport = Viewport::equal_aspect(options.extent, plot);

    let painted = draw_mesh(&mut figure, &viewport, field, &colormap, &scale);
    decorations::draw_gridlines(&mut figure, &viewport);

    let mut segments = 0;
    for layer in [&options.coastlines, &options.borders].into_iter().flatten() {
        segments += layer.draw(&mut figure, &viewport);
    }
    if segments == 0 {
        warn!(
            extent = %format_extent(&options.extent.to_extent()),
            "No coastline or border falls inside the map extent"
        );
    }

    decorations::draw_frame(&mut figure, &viewport.area);
    let bar = figure.colorbar_area(&viewport.area);
    decorations::draw_colorbar(&mut figure, &bar, &colormap, &scale, &options.colorbar_label);
    decorations::draw_titles(&mut figure, &viewport.area, &options.title, None, None);
    figure.set_text(keywords::EXTENT, format_extent(&options.extent.to_extent()));
    figure.set_text(keywords::SOFTWARE, concat!("region-mask ", env!("CARGO_PKG_VERSION")));

    info!(
        variable = field.name(),
        min = scale.min,
        max = scale.max,
        pixels = painted,
        overlay_segments = segments,
        "Rendered concentration map"
    );
    Ok(figure)
}
