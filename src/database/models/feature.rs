use crate::geometry::{FeatureGeometry, GeometryKind};

/// A `features` row as the store hands it back. `geometry` is GeoJSON text.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FeatureRow {
    pub id: i32,
    pub geom_type: String,
    pub geometry: String,
}

/// Insert payload: a parsed geometry, its SRID and the caller-supplied kind.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeature {
    pub geometry: FeatureGeometry,
    pub srid: i32,
    pub kind: GeometryKind,
}
