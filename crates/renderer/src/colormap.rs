//! Named colormaps.
//!
//! Each map is a list of evenly spaced hex color stops sampled from the
//! matplotlib/ColorBrewer definitions and interpolated linearly in RGB. A
//! `_r` suffix reverses any map.

use crate::error::{RenderError, RenderResult};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const GRID: Color = Color::new(128, 128, 128, 160);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse `#rrggbb` into an opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b, 255))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

const BLUES: &[&str] = &[
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

const GREENS: &[&str] = &[
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
    "#00441b",
];

const REDS: &[&str] = &[
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];

const RDBU: &[&str] = &[
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
    "#4393c3", "#2166ac", "#053061",
];

const VIRIDIS: &[&str] = &[
    "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962", "#addc30",
    "#fde725",
];

const TURBO: &[&str] = &[
    "#30123b", "#4662d7", "#36aaf9", "#1ae4b6", "#72fe5e", "#c8ef34", "#faba39", "#f66b19",
    "#7a0403",
];

/// Names accepted by [`Colormap::by_name`], without the `_r` suffix.
pub const COLORMAP_NAMES: &[&str] = &["Blues", "Greens", "Reds", "RdBu", "viridis", "turbo"];

fn stops_for(base: &str) -> Option<&'static [&'static str]> {
    match base {
        "Blues" => Some(BLUES),
        "Greens" => Some(GREENS),
        "Reds" => Some(REDS),
        "RdBu" => Some(RDBU),
        "viridis" => Some(VIRIDIS),
        "turbo" => Some(TURBO),
        _ => None,
    }
}

/// A continuous colormap over the unit interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<Color>,
}

impl Colormap {
    /// Look up a colormap by its matplotlib name (`Greens`, `RdBu_r`, ...).
    pub fn by_name(name: &str) -> RenderResult<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };

        let hex = stops_for(base).ok_or_else(|| RenderError::UnknownColormap(name.to_string()))?;
        let mut stops: Vec<Color> = hex.iter().filter_map(|h| Color::from_hex(h)).collect();
        if reversed {
            stops.reverse();
        }

        Ok(Self {
            name: name.to_string(),
            stops,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at position `t` in `[0, 1]`; values outside are clamped.
    pub fn color_at(&self, t: f64) -> Color {
        let Some(last) = self.stops.len().checked_sub(1) else {
            return Color::transparent();
        };
        if last == 0 || t.is_nan() {
            return self.stops[0];
        }

        let pos = t.clamp(0.0, 1.0) * last as f64;
        let lower = (pos.floor() as usize).min(last - 1);
        let frac = (pos - lower as f64) as f32;
        interpolate_color(self.stops[lower], self.stops[lower + 1], frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::new(255, 128, 0, 255)));
        assert_eq!(Color::from_hex("ff8000"), Some(Color::new(255, 128, 0, 255)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let c = interpolate_color(Color::new(0, 0, 0, 255), Color::new(200, 100, 50, 255), 0.5);
        assert_eq!(c, Color::new(100, 50, 25, 255));
    }

    #[test]
    fn test_endpoints() {
        let greens = Colormap::by_name("Greens").unwrap();
        assert_eq!(greens.color_at(0.0), Color::from_hex("#f7fcf5").unwrap());
        assert_eq!(greens.color_at(1.0), Color::from_hex("#00441b").unwrap());
        // Clamped
        assert_eq!(greens.color_at(-3.0), greens.color_at(0.0));
        assert_eq!(greens.color_at(7.0), greens.color_at(1.0));
    }

    #[test]
    fn test_reversed() {
        let rdbu = Colormap::by_name("RdBu").unwrap();
        let rdbu_r = Colormap::by_name("RdBu_r").unwrap();
        assert_eq!(rdbu.color_at(0.0), rdbu_r.color_at(1.0));
        assert_eq!(rdbu.color_at(0.25), rdbu_r.color_at(0.75));
        // RdBu_r runs blue -> white -> red
        let high = rdbu_r.color_at(1.0);
        assert!(high.r > high.b);
        assert_eq!(rdbu_r.color_at(0.5), Color::from_hex("#f7f7f7").unwrap());
    }

    #[test]
    fn test_all_names_resolve() {
        for name in COLORMAP_NAMES {
            assert!(Colormap::by_name(name).is_ok());
            assert!(Colormap::by_name(&format!("{}_r", name)).is_ok());
        }
    }

    #[test]
    fn test_unknown() {
        match Colormap::by_name("jet") {
            Err(RenderError::UnknownColormap(name)) => assert_eq!(name, "jet"),
            other => panic!("expected UnknownColormap, got {:?}", other),
        }
        assert!(Colormap::by_name("_r").is_err());
    }
}
