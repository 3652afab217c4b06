//! Boundary loading: parse, repair, explode, filter, reproject.

use std::fmt;
use std::path::Path;

use geo::Polygon;
use geojson::{Feature, GeoJson, JsonObject};
use mask_common::{BoundingBox, Crs};
use projection::CrsTransform;
use tracing::{debug, info};

use crate::convert::areal_parts;
use crate::error::{BoundaryError, BoundaryResult};
use crate::repair::repair;
use crate::reproject;
use crate::validity::check_polygon;

/// One cleaned single-part polygon with the attributes of its source feature.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Simple polygon in WGS84 lon/lat
    pub geometry: Polygon<f64>,
    /// Properties copied from the source feature
    pub properties: JsonObject,
    /// Position of the source feature in the input document
    pub source_index: usize,
}

/// Counters collected while loading a boundary document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Features read from the document
    pub features: usize,
    /// Features without a geometry
    pub null_geometries: usize,
    /// Point and line members discarded as non-areal
    pub non_areal: usize,
    /// Polygons changed by the repair step
    pub repaired: usize,
    /// Rows produced from multi-part geometries
    pub exploded_parts: usize,
    /// Parts still invalid after repair
    pub dropped_invalid: usize,
    /// Polygons kept
    pub retained: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} features -> {} polygons ({} repaired, {} exploded, {} invalid dropped, {} null, {} non-areal)",
            self.features,
            self.retained,
            self.repaired,
            self.exploded_parts,
            self.dropped_invalid,
            self.null_geometries,
            self.non_areal
        )
    }
}

/// The cleaned geometry collection.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    features: Vec<BoundaryFeature>,
    source_crs: Crs,
    report: LoadReport,
}

impl BoundarySet {
    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<f64>> {
        self.features.iter().map(|f| &f.geometry)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// CRS the input document was declared in (or assumed to be in).
    pub fn source_crs(&self) -> Crs {
        self.source_crs
    }

    /// CRS of the cleaned geometries, always WGS84.
    pub fn crs(&self) -> Crs {
        Crs::WGS84
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Combined extent of all polygons.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.polygons()
                .flat_map(|p| p.exterior().coords())
                .map(|c| (c.x, c.y)),
        )
    }
}

/// Loads boundary documents into a [`BoundarySet`].
#[derive(Debug, Clone)]
pub struct BoundaryLoader {
    default_crs: Crs,
}

impl Default for BoundaryLoader {
    fn default() -> Self {
        Self {
            default_crs: Crs::WGS84,
        }
    }
}

impl BoundaryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// CRS assumed for documents without a `crs` member.
    pub fn with_default_crs(mut self, crs: Crs) -> Self {
        self.default_crs = crs;
        self
    }

    /// Load a GeoJSON file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> BoundaryResult<BoundarySet> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading boundary file");

        let contents = std::fs::read_to_string(path).map_err(|source| BoundaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&contents)
    }

    /// Load a GeoJSON document held in memory.
    pub fn load_str(&self, document: &str) -> BoundaryResult<BoundarySet> {
        let geojson: GeoJson = document.parse()?;

        let (features, crs_member) = match geojson {
            GeoJson::FeatureCollection(fc) => (fc.features, fc.foreign_members),
            GeoJson::Feature(f) => {
                let members = f.foreign_members.clone();
                (vec![f], members)
            }
            GeoJson::Geometry(g) => {
                let members = g.foreign_members.clone();
                (vec![Feature::from(g)], members)
            }
        };

        let source_crs = match crs_member.as_ref().and_then(|m| m.get("crs")) {
            Some(value) => parse_crs_member(value)?,
            None => self.default_crs,
        };
        let transform = CrsTransform::from_epsg(source_crs.epsg())?;

        let mut report = LoadReport::default();
        let mut cleaned = Vec::new();

        for (index, feature) in features.into_iter().enumerate() {
            report.features += 1;

            // A null geometry is never valid, so it is filtered here
            let Some(geometry) = feature.geometry.as_ref() else {
                report.null_geometries += 1;
                continue;
            };

            let parts = areal_parts(geometry, index)?;
            report.non_areal += parts.non_areal;
            let properties = feature.properties.clone().unwrap_or_default();

            let mut rows = Vec::new();
            for rings in parts.polygons {
                let repaired = repair(rings);
                if repaired.modified {
                    report.repaired += 1;
                }
                rows.extend(repaired.polygons);
            }
            if rows.len() > 1 {
                report.exploded_parts += rows.len();
            }

            for polygon in rows {
                if let Err(reason) = check_polygon(&polygon) {
                    debug!(feature = index, ?reason, "Dropping invalid polygon");
                    report.dropped_invalid += 1;
                    continue;
                }
                cleaned.push(BoundaryFeature {
                    geometry: reproject::to_wgs84(&polygon, &transform)?,
                    properties: properties.clone(),
                    source_index: index,
                });
            }
        }

        report.retained = cleaned.len();
        info!(crs = %source_crs, "Loaded boundaries: {}", report);

        Ok(BoundarySet {
            features: cleaned,
            source_crs,
            report,
        })
    }
}

/// Load a boundary file with default settings.
pub fn load_boundaries(path: impl AsRef<Path>) -> BoundaryResult<BoundarySet> {
    BoundaryLoader::new().load_path(path)
}

/// Load a boundary document from a string with default settings.
pub fn load_boundaries_str(document: &str) -> BoundaryResult<BoundarySet> {
    BoundaryLoader::new().load_str(document)
}

/// Read the legacy `{"type": "name", "properties": {"name": ...}}` member.
fn parse_crs_member(value: &serde_json::Value) -> BoundaryResult<Crs> {
    let kind = value.get("type").and_then(|t| t.as_str());
    if kind != Some("name") {
        return Err(BoundaryError::InvalidCrs(format!(
            "expected a named crs, got {}",
            value
        )));
    }
    let name = value
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .ok_or_else(|| BoundaryError::InvalidCrs("crs member has no name".to_string()))?;

    Crs::parse(name).map_err(|e| BoundaryError::InvalidCrs(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_crs_member() {
        let value = json!({"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3035"}});
        assert_eq!(parse_crs_member(&value).unwrap(), Crs::from_epsg(3035));

        let linked = json!({"type": "link", "properties": {"href": "x"}});
        assert!(matches!(parse_crs_member(&linked), Err(BoundaryError::InvalidCrs(_))));
    }

    #[test]
    fn test_bare_geometry_document() {
        let set = load_boundaries_str(
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.features()[0].properties.is_empty());
        assert_eq!(set.source_crs(), Crs::WGS84);
    }

    #[test]
    fn test_open_ring_counts_as_repaired() {
        let set = load_boundaries_str(
            r#"{"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1]]]}}"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.report().repaired, 1);
    }

    #[test]
    fn test_default_crs_override() {
        let set = BoundaryLoader::new()
            .with_default_crs(Crs::from_epsg(3857))
            .load_str(r#"{"type":"Polygon","coordinates":[[[0,0],[111319.49,0],[111319.49,111325.14],[0,0]]]}"#)
            .unwrap();
        let bbox = set.bbox().unwrap();
        assert!((bbox.max_x - 1.0).abs() < 1e-4);
    }
}
