use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::FeatureStats;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a FeatureCollection, one feature per line in text mode
pub fn output_features(output_format: &OutputFormat, collection: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(collection)?),
        OutputFormat::Text => {
            let features = collection
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if features.is_empty() {
                println!("No features stored");
            }
            for line in features.iter().map(feature_line) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub fn output_stats(output_format: &OutputFormat, stats: &FeatureStats) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => {
            println!("Points:   {}", stats.points);
            println!("Lines:    {}", stats.lines);
            println!("Polygons: {}", stats.polygons);
            println!("Total:    {}", stats.total());
        }
    }
    Ok(())
}

pub fn output_value(output_format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            if let Some(object) = value.as_object() {
                for (key, v) in object {
                    match v {
                        Value::String(s) => println!("{}: {}", key, s),
                        other => println!("{}: {}", key, other),
                    }
                }
            } else {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

/// `id<TAB>type<TAB>geometry` for one GeoJSON feature
pub fn feature_line(feature: &Value) -> String {
    let properties = &feature["properties"];
    format!("{}\t{}\t{}", properties["id"], properties["type"].as_str().unwrap_or("?"), feature["geometry"])
}
