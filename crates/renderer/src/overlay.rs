//! Line overlays (coastlines, borders) loaded from GeoJSON.

use std::path::{Path, PathBuf};

use geojson::{GeoJson, Geometry, Value};
use imageproc::drawing::draw_line_segment_mut;
use mask_common::BoundingBox;
use tracing::debug;

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};
use crate::figure::Figure;
use crate::viewport::Viewport;

type Line = Vec<(f64, f64)>;

/// A named set of polylines in lon/lat.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub name: String,
    pub color: Color,
    lines: Vec<Line>,
}

impl OverlayLayer {
    pub fn new(name: impl Into<String>, color: Color, lines: Vec<Vec<(f64, f64)>>) -> Self {
        Self {
            name: name.into(),
            color,
            lines,
        }
    }

    /// Parse a GeoJSON document. Line strings are taken as-is; polygon rings
    /// become closed lines; points are ignored.
    pub fn from_geojson_str(name: &str, color: Color, source: &str) -> RenderResult<Self> {
        let geojson: GeoJson = source.parse().map_err(|e: geojson::Error| RenderError::Overlay {
            path: PathBuf::from(name),
            reason: e.to_string(),
        })?;

        let mut lines = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in fc.features {
                    if let Some(geometry) = feature.geometry {
                        collect_lines(&geometry, &mut lines);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = feature.geometry {
                    collect_lines(&geometry, &mut lines);
                }
            }
            GeoJson::Geometry(geometry) => collect_lines(&geometry, &mut lines),
        }

        debug!(layer = name, lines = lines.len(), "Loaded overlay");
        Ok(Self::new(name, color, lines))
    }

    pub fn from_path(path: impl AsRef<Path>, color: Color) -> RenderResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| RenderError::Overlay {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_geojson_str(&name, color, &source).map_err(|e| match e {
            RenderError::Overlay { reason, .. } => RenderError::Overlay {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn lines(&self) -> &[Vec<(f64, f64)>] {
        &self.lines
    }

    /// Draw every segment clipped to the viewport extent.
    ///
    /// Returns the number of segments drawn.
    pub fn draw(&self, figure: &mut Figure, viewport: &Viewport) -> usize {
        let mut drawn = 0;
        for line in &self.lines {
            for pair in line.windows(2) {
                let Some((a, b)) = clip_segment(pair[0], pair[1], &viewport.extent) else {
                    continue;
                };
                let from = (viewport.lon_to_x(a.0) as f32, viewport.lat_to_y(a.1) as f32);
                let to = (viewport.lon_to_x(b.0) as f32, viewport.lat_to_y(b.1) as f32);
                draw_line_segment_mut(figure.image_mut(), from, to, self.color.to_rgba());
                drawn += 1;
            }
        }
        debug!(layer = %self.name, segments = drawn, "Drew overlay");
        drawn
    }
}

fn position(p: &[f64]) -> Option<(f64, f64)> {
    match p {
        [x, y, ..] => Some((*x, *y)),
        _ => None,
    }
}

fn to_line(positions: &[Vec<f64>]) -> Line {
    positions.iter().filter_map(|p| position(p)).collect()
}

fn collect_lines(geometry: &Geometry, out: &mut Vec<Line>) {
    match &geometry.value {
        Value::LineString(ls) => out.push(to_line(ls)),
        Value::MultiLineString(mls) => out.extend(mls.iter().map(|ls| to_line(ls))),
        Value::Polygon(rings) => out.extend(rings.iter().map(|r| to_line(r))),
        Value::MultiPolygon(polys) => {
            out.extend(polys.iter().flatten().map(|r| to_line(r)));
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_lines(member, out);
            }
        }
        // Points carry no line work
        _ => {}
    }
}

/// Liang-Barsky clipping of segment `a`-`b` to `bbox`.
pub fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    bbox: &BoundingBox,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, a.0 - bbox.min_x),
        (dx, bbox.max_x - a.0),
        (-dy, a.1 - bbox.min_y),
        (dy, bbox.max_y - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}
