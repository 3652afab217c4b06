//! Lambert Conformal Conic projection (two standard parallels, ellipsoidal).
//!
//! Maps a cone secant to the ellipsoid along two standard parallels onto a
//! flat plane. Used for pan-European conformal mapping (ETRS89-LCC,
//! EPSG:3034).
//!
//! The projection parameters include:
//! - Latitude and longitude of the false origin (latF, lonF)
//! - Standard parallels: latin1 and latin2 (equal for a tangent cone)
//! - False easting/northing at the false origin

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::ellipsoid::Ellipsoid;

/// Lambert Conformal Conic projection parameters.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    pub ellipsoid: Ellipsoid,
    /// Longitude of false origin in radians
    pub lon0: f64,
    /// Latitude of false origin in radians
    pub lat0: f64,
    /// First standard parallel in radians
    pub latin1: f64,
    /// Second standard parallel in radians
    pub latin2: f64,
    /// False easting (meters)
    pub false_easting: f64,
    /// False northing (meters)
    pub false_northing: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the false origin
    rho0: f64,
}

impl LambertConformal {
    /// Create a projection from parameters in degrees and meters.
    pub fn new(
        ellipsoid: Ellipsoid,
        lat0_deg: f64,
        lon0_deg: f64,
        latin1_deg: f64,
        latin2_deg: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();
        let latin1 = latin1_deg.to_radians();
        let latin2 = latin2_deg.to_radians();
        let e = ellipsoid.e();

        let m1 = conformal_m(latin1, e);
        let m2 = conformal_m(latin2, e);
        let t1 = conformal_t(latin1, e);
        let t2 = conformal_t(latin2, e);
        let t0 = conformal_t(lat0, e);

        // Compute cone constant n
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone (single standard parallel)
            latin1.sin()
        } else {
            // Secant cone (two standard parallels)
            (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
        };

        let f = m1 / (n * t1.powf(n));
        let rho0 = ellipsoid.a * f * t0.powf(n);

        Self {
            ellipsoid,
            lon0,
            lat0,
            latin1,
            latin2,
            false_easting,
            false_northing,
            n,
            f,
            rho0,
        }
    }

    /// ETRS89 / LCC Europe (EPSG:3034).
    pub fn etrs89_lcc() -> Self {
        Self::new(Ellipsoid::GRS80, 52.0, 10.0, 35.0, 65.0, 4_000_000.0, 2_800_000.0)
    }

    /// Geographic `(lat, lon)` in degrees to `(easting, northing)` in meters.
    pub fn forward(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();

        // Normalize longitude difference to [-π, π]
        let mut dlon = lon_deg.to_radians() - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let t = conformal_t(lat, self.ellipsoid.e());
        let rho = self.ellipsoid.a * self.f * t.powf(self.n);
        let theta = self.n * dlon;

        (
            self.false_easting + rho * theta.sin(),
            self.false_northing + self.rho0 - rho * theta.cos(),
        )
    }

    /// `(easting, northing)` in meters to geographic `(lat, lon)` in degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let e = self.ellipsoid.e();
        let dx = easting - self.false_easting;
        let dy = self.rho0 - (northing - self.false_northing);

        let mut rho = dx.hypot(dy);
        if self.n < 0.0 {
            rho = -rho;
        }
        let theta = if self.n < 0.0 {
            (-dx).atan2(-dy)
        } else {
            dx.atan2(dy)
        };

        let t = (rho / (self.ellipsoid.a * self.f)).powf(1.0 / self.n);

        let mut lat = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..15 {
            let es = e * lat.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
            if (next - lat).abs() < 1e-12 {
                lat = next;
                break;
            }
            lat = next;
        }

        let lon = theta / self.n + self.lon0;
        (lat.to_degrees(), lon.to_degrees())
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

fn conformal_m(lat: f64, e: f64) -> f64 {
    lat.cos() / (1.0 - (e * lat.sin()).powi(2)).sqrt()
}

fn conformal_t(lat: f64, e: f64) -> f64 {
    let es = e * lat.sin();
    (FRAC_PI_4 - lat / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_origin() {
        let proj = LambertConformal::etrs89_lcc();
        let (e, n) = proj.forward(52.0, 10.0);
        assert!((e - 4_000_000.0).abs() < 1e-6, "e should be false easting, got {}", e);
        assert!((n - 2_800_000.0).abs() < 1e-6, "n should be false northing, got {}", n);
    }

    #[test]
    fn test_roundtrip() {
        let proj = LambertConformal::etrs89_lcc();
        for &(lat, lon) in &[(51.5, -0.12), (40.4, -3.7), (60.17, 24.94), (35.0, 30.0)] {
            let (e, n) = proj.forward(lat, lon);
            let (lat2, lon2) = proj.inverse(e, n);
            assert!((lat2 - lat).abs() < 1e-9, "lat roundtrip failed: {} vs {}", lat, lat2);
            assert!((lon2 - lon).abs() < 1e-9, "lon roundtrip failed: {} vs {}", lon, lon2);
        }
    }

    #[test]
    fn test_west_of_origin_has_smaller_easting() {
        let proj = LambertConformal::etrs89_lcc();
        let (e_west, _) = proj.forward(52.0, 0.0);
        let (e_east, _) = proj.forward(52.0, 20.0);
        assert!(e_west < 4_000_000.0);
        assert!(e_east > 4_000_000.0);
        assert!(proj.cone_constant() > 0.0 && proj.cone_constant() < 1.0);
    }
}
