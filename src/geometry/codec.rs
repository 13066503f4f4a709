use geo_types::{Coord, LineString, Point, Polygon};
use serde_json::Value;

use super::{GeometryError, GeometryKind};

/// A geometry accepted on the write path. Anything else is rejected before
/// it reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl FeatureGeometry {
    /// Parse a GeoJSON geometry object such as
    /// `{"type": "Point", "coordinates": [30.5234, 50.4501]}`.
    pub fn parse(payload: &Value) -> Result<Self, GeometryError> {
        let geometry: geojson::Geometry = serde_json::from_value(payload.clone())
            .map_err(|e| GeometryError::Malformed(e.to_string()))?;
        Self::try_from(geometry)
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            FeatureGeometry::Point(_) => GeometryKind::Point,
            FeatureGeometry::LineString(_) => GeometryKind::LineString,
            FeatureGeometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    pub fn to_geojson(&self) -> geojson::Geometry {
        let value = match self {
            FeatureGeometry::Point(point) => geojson::Value::from(point),
            FeatureGeometry::LineString(line) => geojson::Value::from(line),
            FeatureGeometry::Polygon(polygon) => geojson::Value::from(polygon),
        };
        geojson::Geometry::new(value)
    }
}

impl TryFrom<geojson::Geometry> for FeatureGeometry {
    type Error = GeometryError;

    fn try_from(geometry: geojson::Geometry) -> Result<Self, Self::Error> {
        match geometry.value {
            geojson::Value::Point(position) => Ok(FeatureGeometry::Point(Point::from(coord(&position)?))),
            geojson::Value::LineString(positions) => Ok(FeatureGeometry::LineString(line_string(&positions)?)),
            geojson::Value::Polygon(rings) => Ok(FeatureGeometry::Polygon(polygon(&rings)?)),
            other => Err(GeometryError::Unsupported(type_name(&other).to_string())),
        }
    }
}

/// Parse GeoJSON text coming back from the store. Any geometry type is
/// accepted here; the read path never rejects what the store holds.
pub fn decode(text: &str) -> Result<geojson::Geometry, GeometryError> {
    serde_json::from_str(text).map_err(|e| GeometryError::Malformed(e.to_string()))
}

// Extra ordinates (Z, M) are dropped.
fn coord(position: &[f64]) -> Result<Coord<f64>, GeometryError> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeometryError::InvalidCoordinates(format!(
            "position {:?} needs at least two ordinates",
            position
        ))),
    }
}

fn coords(positions: &[Vec<f64>]) -> Result<Vec<Coord<f64>>, GeometryError> {
    positions.iter().map(|p| coord(p)).collect()
}

fn line_string(positions: &[Vec<f64>]) -> Result<LineString<f64>, GeometryError> {
    if positions.len() < 2 {
        return Err(GeometryError::InvalidCoordinates(format!(
            "LineString needs at least 2 positions, got {}",
            positions.len()
        )));
    }
    Ok(LineString::new(coords(positions)?))
}

// Open rings are closed by repeating the first position.
fn linear_ring(positions: &[Vec<f64>]) -> Result<LineString<f64>, GeometryError> {
    let mut ring = LineString::new(coords(positions)?);
    ring.close();
    if ring.0.len() < 4 {
        return Err(GeometryError::InvalidCoordinates(format!(
            "Polygon ring needs at least 4 positions once closed, got {}",
            ring.0.len()
        )));
    }
    Ok(ring)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>, GeometryError> {
    let (exterior, interiors) = rings.split_first().ok_or_else(|| {
        GeometryError::InvalidCoordinates("Polygon needs an exterior ring".to_string())
    })?;
    let exterior = linear_ring(exterior)?;
    let interiors = interiors
        .iter()
        .map(|ring| linear_ring(ring))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}
