//! Mapping between geographic coordinates and figure pixels.
//!
//! Plots use an equirectangular (Plate Carrée) view: longitude maps
//! linearly to x, latitude linearly to y with north at the top.

use mask_common::BoundingBox;

/// Pixel rectangle inside a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A geographic extent drawn into a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub extent: BoundingBox,
    pub area: PlotArea,
}

impl Viewport {
    /// Stretch `extent` over the whole of `area`.
    pub fn new(extent: BoundingBox, area: PlotArea) -> Self {
        Self { extent, area }
    }

    /// Fit `extent` into `area` keeping one degree of longitude as wide as
    /// one degree of latitude is tall, centred in the spare space.
    pub fn equal_aspect(extent: BoundingBox, area: PlotArea) -> Self {
        let (w, h) = (extent.width(), extent.height());
        if !(w > 0.0 && h > 0.0) {
            return Self::new(extent, area);
        }

        let scale = (area.width as f64 / w).min(area.height as f64 / h);
        let width = ((w * scale).round() as u32).clamp(1, area.width.max(1));
        let height = ((h * scale).round() as u32).clamp(1, area.height.max(1));
        let fitted = PlotArea {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        Self::new(extent, fitted)
    }

    pub fn lon_to_x(&self, lon: f64) -> f64 {
        self.area.x as f64 + (lon - self.extent.min_x) / self.extent.width() * self.area.width as f64
    }

    pub fn lat_to_y(&self, lat: f64) -> f64 {
        self.area.y as f64
            + (self.extent.max_y - lat) / self.extent.height() * self.area.height as f64
    }

    /// Longitude at the centre of pixel column `px` (figure coordinates).
    pub fn x_to_lon(&self, px: u32) -> f64 {
        let frac = (px as f64 + 0.5 - self.area.x as f64) / self.area.width as f64;
        self.extent.min_x + frac * self.extent.width()
    }

    /// Latitude at the centre of pixel row `py` (figure coordinates).
    pub fn y_to_lat(&self, py: u32) -> f64 {
        let frac = (py as f64 + 0.5 - self.area.y as f64) / self.area.height as f64;
        self.extent.max_y - frac * self.extent.height()
    }
}
