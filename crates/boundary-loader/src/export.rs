//! Export of cleaned boundaries as a GeoJSON FeatureCollection.

use std::path::Path;

use geojson::{Feature, FeatureCollection};
use tracing::info;

use crate::convert::polygon_to_geojson;
use crate::error::{BoundaryError, BoundaryResult};
use crate::loader::BoundarySet;

/// Property key holding the index of the source feature.
pub const SOURCE_INDEX_PROPERTY: &str = "source_index";

/// Build a FeatureCollection with one feature per cleaned polygon.
pub fn to_feature_collection(set: &BoundarySet) -> FeatureCollection {
    let features = set
        .features()
        .iter()
        .map(|f| {
            let mut properties = f.properties.clone();
            properties
                .entry(SOURCE_INDEX_PROPERTY)
                .or_insert_with(|| f.source_index.into());
            Feature {
                bbox: None,
                geometry: Some(polygon_to_geojson(&f.geometry)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write cleaned boundaries to `path`, replacing any existing file.
pub fn write_geojson(set: &BoundarySet, path: impl AsRef<Path>) -> BoundaryResult<()> {
    let path = path.as_ref();
    let collection = to_feature_collection(set);

    std::fs::write(path, collection.to_string()).map_err(|source| BoundaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), features = set.len(), "Wrote cleaned boundaries");
    Ok(())
}
