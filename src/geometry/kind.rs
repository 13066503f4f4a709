use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::GeometryError;

/// The three geometry kinds a feature may carry.
///
/// Serialised with the exact GeoJSON type names. Matching is case-sensitive
/// everywhere: `"point"` is not a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 3] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }

    /// Key used for this kind in the `/stats` payload
    pub fn stats_key(&self) -> &'static str {
        match self {
            GeometryKind::Point => "points",
            GeometryKind::LineString => "lines",
            GeometryKind::Polygon => "polygons",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GeometryError::UnknownKind(s.to_string()))
    }
}
