//! Conversion between GeoJSON documents and `geo` polygons.
//!
//! Rings are kept exactly as written (no implicit closing) so that the
//! repair step can see and count open rings.

use geo::{Coord, LineString, Polygon};
use geojson::{Geometry, PolygonType, Position, Value};
use tracing::debug;

use crate::error::{BoundaryError, BoundaryResult};

/// Polygon rings as read from the document; the first ring is the shell.
pub type RawRings = Vec<Vec<Coord<f64>>>;

/// The areal content of one feature geometry.
#[derive(Debug, Default)]
pub struct ArealParts {
    /// Polygonal members, in document order
    pub polygons: Vec<RawRings>,
    /// Whether the geometry was multi-part (MultiPolygon / GeometryCollection)
    pub multi_part: bool,
    /// Points and lines encountered and discarded
    pub non_areal: usize,
}

/// Extract the polygonal members of a GeoJSON geometry.
pub fn areal_parts(geometry: &Geometry, feature: usize) -> BoundaryResult<ArealParts> {
    let mut parts = ArealParts::default();
    collect(&geometry.value, feature, &mut parts)?;
    Ok(parts)
}

fn collect(value: &Value, feature: usize, parts: &mut ArealParts) -> BoundaryResult<()> {
    match value {
        Value::Polygon(rings) => parts.polygons.push(rings_from(rings, feature)?),
        Value::MultiPolygon(polygons) => {
            parts.multi_part = true;
            for rings in polygons {
                parts.polygons.push(rings_from(rings, feature)?);
            }
        }
        Value::GeometryCollection(members) => {
            parts.multi_part = true;
            for member in members {
                collect(&member.value, feature, parts)?;
            }
        }
        other => {
            debug!(
                feature = feature,
                kind = kind_name(other),
                "Dropping non-areal geometry"
            );
            parts.non_areal += 1;
        }
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn rings_from(rings: &PolygonType, feature: usize) -> BoundaryResult<RawRings> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| coord_from(position, feature))
                .collect::<BoundaryResult<Vec<_>>>()
        })
        .collect()
}

fn coord_from(position: &Position, feature: usize) -> BoundaryResult<Coord<f64>> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(BoundaryError::MalformedGeometry {
            feature,
            reason: format!("position has {} ordinates, expected at least 2", position.len()),
        }),
    }
}

/// A GeoJSON geometry for a cleaned polygon.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> Geometry {
    let ring = |line: &LineString<f64>| -> Vec<Position> {
        line.coords().map(|c| vec![c.x, c.y]).collect()
    };

    let mut rings = vec![ring(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring));
    Geometry::new(Value::Polygon(rings))
}
