//! Reference ellipsoids.

/// A reference ellipsoid given by its semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257223563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// Airy 1830, used by OSGB36 (British National Grid).
    pub const AIRY_1830: Ellipsoid = Ellipsoid {
        a: 6377563.396,
        f: 1.0 - 6356256.909 / 6377563.396,
    };

    /// Airy Modified 1849, used by TM75 (Irish Grid).
    pub const AIRY_MODIFIED: Ellipsoid = Ellipsoid {
        a: 6377340.189,
        f: 1.0 - 6356034.447 / 6377340.189,
    };

    /// Semi-minor axis (meters).
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// First eccentricity.
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }
}
