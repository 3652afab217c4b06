//! Coordinate Reference System identifiers.
//!
//! Boundary files name their CRS in several spellings: plain `EPSG:27700`,
//! OGC URNs (`urn:ogc:def:crs:EPSG::27700`), OGC HTTP URIs and the GeoJSON
//! `CRS84` alias. All of them are normalized to an EPSG code here; the actual
//! coordinate math lives in the `projection` crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate reference system identified by its EPSG code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    epsg: u32,
}

impl Crs {
    /// Geographic WGS84 (lon/lat in degrees), the CRS every grid is defined in.
    pub const WGS84: Crs = Crs { epsg: 4326 };

    pub fn from_epsg(epsg: u32) -> Self {
        Self { epsg }
    }

    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    pub fn is_wgs84(&self) -> bool {
        self.epsg == Self::WGS84.epsg
    }

    /// Parse a CRS name.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "urn:ogc:def:crs:EPSG::27700" (with or without a version segment)
    /// - "http://www.opengis.net/def/crs/EPSG/0/3035"
    /// - "urn:ogc:def:crs:OGC:1.3:CRS84" / "CRS:84" (WGS84 with lon/lat axis order)
    pub fn parse(name: &str) -> Result<Self, CrsParseError> {
        let normalized = name.trim().to_uppercase();

        if normalized.ends_with("CRS84") || normalized == "CRS:84" {
            return Ok(Self::WGS84);
        }

        let code = if let Some(rest) = normalized.strip_prefix("EPSG:") {
            Some(rest)
        } else if normalized.starts_with("URN:OGC:DEF:CRS:EPSG:") {
            normalized.rsplit(':').next()
        } else if normalized.contains("/DEF/CRS/EPSG/") {
            normalized.rsplit('/').next()
        } else {
            None
        };

        code.and_then(|c| c.parse::<u32>().ok())
            .map(Self::from_epsg)
            .ok_or_else(|| CrsParseError::UnrecognizedName(name.to_string()))
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unrecognized CRS name: {0}")]
    UnrecognizedName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(Crs::parse("EPSG:4326").unwrap(), Crs::WGS84);
        assert_eq!(Crs::parse("epsg:27700").unwrap().epsg(), 27700);
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:EPSG::3035").unwrap().epsg(),
            3035
        );
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:EPSG:6.6:29903").unwrap().epsg(),
            29903
        );
        assert_eq!(
            Crs::parse("http://www.opengis.net/def/crs/EPSG/0/3857")
                .unwrap()
                .epsg(),
            3857
        );
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:OGC:1.3:CRS84").unwrap(),
            Crs::WGS84
        );
        assert!(Crs::parse("WGS 84 / Pseudo-Mercator").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Crs::from_epsg(27700).to_string(), "EPSG:27700");
        assert!(Crs::default().is_wgs84());
    }
}
