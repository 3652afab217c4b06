//! Optional TrueType text rendering.
//!
//! No font is bundled. Figures draw text only when a font file is supplied or
//! one of the usual system locations holds DejaVu Sans; labels are always
//! kept in the PNG metadata regardless.

use std::path::Path;

use image::RgbaImage;
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};
use tracing::{debug, warn};

use crate::colormap::Color;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Horizontal placement of text relative to the anchor x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

fn read_font(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

/// Load the font at `explicit`, or the first system font found.
pub fn load_font(explicit: Option<&Path>) -> Option<Font<'static>> {
    if let Some(path) = explicit {
        match read_font(path) {
            Some(font) => return Some(font),
            None => warn!(path = %path.display(), "Could not load font, trying system fonts"),
        }
    }

    let found = SYSTEM_FONTS
        .iter()
        .map(Path::new)
        .find_map(|p| read_font(p).map(|font| (p, font)));
    match found {
        Some((path, font)) => {
            debug!(path = %path.display(), "Using system font");
            Some(font)
        }
        None => {
            debug!("No font available, figure text is metadata only");
            None
        }
    }
}

/// Size, colour and alignment of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, align: Align) -> Self {
        Self {
            size,
            color: Color::BLACK,
            align,
        }
    }
}

/// Approximate rendered width, assuming roughly monospace glyphs.
pub fn text_width(text: &str, size: f32) -> i32 {
    (text.chars().count() as f32 * size * 0.6) as i32
}

/// Draw `text` with its top edge at `y`.
pub fn draw_text(
    image: &mut RgbaImage,
    font: &Font<'static>,
    (x, y): (i32, i32),
    text: &str,
    style: TextStyle,
) {
    let width = text_width(text, style.size);
    let x = match style.align {
        Align::Left => x,
        Align::Center => x - width / 2,
        Align::Right => x - width,
    };
    draw_text_mut(
        image,
        style.color.to_rgba(),
        x,
        y,
        Scale::uniform(style.size),
        font,
        text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_scales() {
        assert_eq!(text_width("", 12.0), 0);
        assert_eq!(text_width("10", 10.0), 12);
        assert!(text_width("Latitude", 14.0) > text_width("Latitude", 10.0));
    }

    #[test]
    fn test_missing_explicit_font_is_not_fatal() {
        // Falls through to system fonts (or None); must not panic.
        let _ = load_font(Some(Path::new("/nonexistent/font.ttf")));
    }
}
