//! A raster figure: canvas, optional font and PNG metadata.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use rusttype::Font;
use tracing::info;

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::png::{create_png_auto, TextEntry};
use crate::text::{self, TextStyle};
use crate::viewport::PlotArea;

const MARGIN_LEFT: u32 = 70;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 55;
const MARGIN_RIGHT: u32 = 20;
/// Room for the colour bar, its ticks and its label.
const COLORBAR_SPACE: u32 = 110;

/// A rendered figure.
pub struct Figure {
    image: RgbaImage,
    metadata: Vec<TextEntry>,
    font: Option<Font<'static>>,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("metadata", &self.metadata)
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl Figure {
    /// A white figure of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width < MARGIN_LEFT + MARGIN_RIGHT + COLORBAR_SPACE + 10
            || height < MARGIN_TOP + MARGIN_BOTTOM + 10
        {
            return Err(RenderError::InvalidInput(format!(
                "figure size {}x{} is too small",
                width, height
            )));
        }

        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            metadata: Vec::new(),
            font: None,
        })
    }

    pub fn with_font(mut self, font: Option<Font<'static>>) -> Self {
        self.font = font;
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Metadata entries, in insertion order.
    pub fn metadata(&self) -> &[TextEntry] {
        &self.metadata
    }

    /// Value of a metadata entry.
    pub fn text(&self, keyword: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.text.as_str())
    }

    /// Set a metadata entry, replacing any previous value.
    pub fn set_text(&mut self, keyword: &str, text: impl Into<String>) {
        let text = text.into();
        match self.metadata.iter_mut().find(|e| e.keyword == keyword) {
            Some(entry) => entry.text = text,
            None => self.metadata.push(TextEntry::new(keyword, text)),
        }
    }

    /// The plot rectangle left after margins and the colour bar strip.
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: self.width() - MARGIN_LEFT - MARGIN_RIGHT - COLORBAR_SPACE,
            height: self.height() - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    /// The colour bar rectangle, to the right of `plot`.
    pub fn colorbar_area(&self, plot: &PlotArea) -> PlotArea {
        PlotArea {
            x: self.width() - MARGIN_RIGHT - COLORBAR_SPACE + 20,
            y: plot.y,
            width: 18,
            height: plot.height,
        }
    }

    /// Draw text if a font is available. Returns whether anything was drawn.
    pub fn draw_text(&mut self, position: (i32, i32), content: &str, style: TextStyle) -> bool {
        match &self.font {
            Some(font) => {
                text::draw_text(&mut self.image, font, position, content, style);
                true
            }
            None => false,
        }
    }

    pub fn fill_rect(&mut self, area: &PlotArea, color: Color) {
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(area.x as i32, area.y as i32).of_size(area.width.max(1), area.height.max(1)),
            color.to_rgba(),
        );
    }

    pub fn stroke_rect(&mut self, area: &PlotArea, color: Color) {
        draw_hollow_rect_mut(
            &mut self.image,
            Rect::at(area.x as i32, area.y as i32).of_size(area.width.max(1), area.height.max(1)),
            color.to_rgba(),
        );
    }

    /// Encode as PNG, metadata included.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        create_png_auto(
            self.image.as_raw(),
            self.width() as usize,
            self.height() as usize,
            &self.metadata,
        )
    }

    /// Write the figure as a PNG file.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let png = self.to_png()?;
        std::fs::write(path, &png).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = png.len(), "Saved figure");
        Ok(())
    }
}
