//! Coordinate reference system transformations.
//!
//! Implements the map projections and datum shifts needed to bring boundary
//! files into geographic WGS84. Projection math is implemented directly;
//! datum shifts use `nalgebra` for the Helmert rotation.

pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod lambert;
pub mod laea;
pub mod mercator;
pub mod transform;
pub mod transverse_mercator;

pub use datum::Helmert;
pub use ellipsoid::Ellipsoid;
pub use error::{ProjectionError, ProjectionResult};
pub use lambert::LambertConformal;
pub use laea::LambertAzimuthalEqualArea;
pub use transform::CrsTransform;
pub use transverse_mercator::TransverseMercator;
