//! Geometry codec: GeoJSON request payloads in, SRID-tagged geometries out.

pub mod codec;
pub mod kind;

pub use codec::{decode, FeatureGeometry};
pub use kind::GeometryKind;

use thiserror::Error;

/// Spatial reference used for every stored geometry (WGS84 longitude/latitude).
pub const WGS84_SRID: i32 = 4326;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Malformed GeoJSON geometry: {0}")]
    Malformed(String),

    #[error("Unsupported geometry type: {0} (expected Point, LineString or Polygon)")]
    Unsupported(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown geometry kind: {0}")]
    UnknownKind(String),
}
