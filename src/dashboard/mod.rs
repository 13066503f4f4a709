//! Server-side dashboard page.
//!
//! [`render`] is a pure function of the stats and the recent features; there
//! is no template state to share between requests.

use std::fmt::Write;

use crate::database::{FeatureRecord, FeatureStats};
use crate::geometry::GeometryKind;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2933; }
h1 { font-size: 1.5rem; }
.cards { display: flex; gap: 1rem; margin-bottom: 2rem; }
.card { border: 1px solid #d2d6dc; border-radius: 6px; padding: 1rem 1.5rem; min-width: 8rem; }
.card .count { font-size: 2rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e4e7eb; padding: 0.4rem 0.6rem; text-align: left; vertical-align: top; }
code { font-size: 0.8rem; word-break: break-all; }
"#;

pub fn render(stats: &FeatureStats, recent: &[FeatureRecord]) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Feature dashboard</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Feature dashboard</h1>\n");

    html.push_str("<section class=\"cards\">\n");
    for kind in GeometryKind::ALL {
        // writing to a String cannot fail
        let _ = writeln!(
            html,
            "<div class=\"card\" id=\"stat-{key}\"><div class=\"label\">{label}</div><div class=\"count\">{count}</div></div>",
            key = kind.stats_key(),
            label = kind.as_str(),
            count = stats.get(kind),
        );
    }
    let _ = writeln!(
        html,
        "<div class=\"card\" id=\"stat-total\"><div class=\"label\">Total</div><div class=\"count\">{}</div></div>",
        stats.total()
    );
    html.push_str("</section>\n");

    let _ = writeln!(html, "<h2>Latest {} features</h2>", recent.len());
    if recent.is_empty() {
        html.push_str("<p class=\"empty\">No features stored yet.</p>\n");
    } else {
        html.push_str("<table>\n<thead><tr><th>ID</th><th>Type</th><th>Vertices</th><th>Geometry</th></tr></thead>\n<tbody>\n");
        for record in recent {
            let geometry = serde_json::to_string(&record.geometry).unwrap_or_default();
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>",
                record.id,
                escape_html(&record.kind),
                vertex_count(&record.geometry.value),
                escape_html(&geometry),
            );
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn vertex_count(value: &geojson::Value) -> usize {
    match value {
        geojson::Value::Point(_) => 1,
        geojson::Value::MultiPoint(points) => points.len(),
        geojson::Value::LineString(line) => line.len(),
        geojson::Value::MultiLineString(lines) => lines.iter().map(Vec::len).sum(),
        geojson::Value::Polygon(rings) => rings.iter().map(Vec::len).sum(),
        geojson::Value::MultiPolygon(polygons) => polygons.iter().flatten().map(Vec::len).sum(),
        geojson::Value::GeometryCollection(geometries) => {
            geometries.iter().map(|g| vertex_count(&g.value)).sum()
        }
    }
}
