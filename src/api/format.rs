use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::Value;

use crate::database::FeatureRecord;

/// Convert a stored record into the public wire format:
/// a GeoJSON Feature with `{id, type}` properties
pub fn record_to_feature(record: &FeatureRecord) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".into(), Value::from(record.id));
    properties.insert("type".into(), Value::String(record.kind.clone()));

    Feature {
        bbox: None,
        geometry: Some(record.geometry.clone()),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Wrap records in a FeatureCollection, preserving their order
pub fn records_to_feature_collection(records: &[FeatureRecord]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: records.iter().map(record_to_feature).collect(),
        foreign_members: None,
    }
}
