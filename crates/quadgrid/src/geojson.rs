//! GeoJSON in and out.
//!
//! Only the geometry half of GeoJSON matters here: a bare geometry object,
//! or a `Feature` wrapping one. Properties are ignored. Positions with a
//! third ordinate are flattened to 2D on the way in.

use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoJsonError;

/// `[x, y]` or `[x, y, z, ...]`.
type Position = Vec<f64>;

/// A GeoJSON geometry object, tagged by its `"type"` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeometryObject {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeometryObject> },
}

/// Decode a GeoJSON geometry (or a `Feature` holding one).
pub fn parse_geometry(json: &str) -> Result<Geometry<f64>, GeoJsonError> {
    let mut value: Value = serde_json::from_str(json)?;

    if value.get("type").and_then(Value::as_str) == Some("Feature") {
        value = match value.get_mut("geometry").map(Value::take) {
            Some(Value::Null) | None => return Err(GeoJsonError::MissingGeometry),
            Some(geometry) => geometry,
        };
    }

    let object: GeometryObject = serde_json::from_value(value)?;
    object.into_geometry()
}

/// Encode a multi-polygon as a GeoJSON geometry object.
pub fn to_geojson(multi: &MultiPolygon<f64>) -> Value {
    let object = GeometryObject::MultiPolygon {
        coordinates: multi.iter().map(polygon_rings).collect(),
    };
    // A tagged enum of plain vectors always serializes
    serde_json::to_value(object).unwrap_or(Value::Null)
}

/// [`to_geojson`] rendered as a compact string.
pub fn to_geojson_string(multi: &MultiPolygon<f64>) -> String {
    to_geojson(multi).to_string()
}

// ============================================================================
// DECODING
// ============================================================================

impl GeometryObject {
    fn into_geometry(self) -> Result<Geometry<f64>, GeoJsonError> {
        Ok(match self {
            GeometryObject::Point { coordinates } => Geometry::Point(Point(coord(&coordinates)?)),
            GeometryObject::MultiPoint { coordinates } => {
                let points = coordinates
                    .iter()
                    .map(|p| coord(p).map(Point))
                    .collect::<Result<Vec<_>, _>>()?;
                Geometry::MultiPoint(MultiPoint::new(points))
            }
            GeometryObject::LineString { coordinates } => Geometry::LineString(line_string(&coordinates)?),
            GeometryObject::MultiLineString { coordinates } => {
                let lines = coordinates
                    .iter()
                    .map(|line| line_string(line))
                    .collect::<Result<Vec<_>, _>>()?;
                Geometry::MultiLineString(MultiLineString::new(lines))
            }
            GeometryObject::Polygon { coordinates } => Geometry::Polygon(polygon(&coordinates)?),
            GeometryObject::MultiPolygon { coordinates } => {
                let polygons = coordinates
                    .iter()
                    .map(|rings| polygon(rings))
                    .collect::<Result<Vec<_>, _>>()?;
                Geometry::MultiPolygon(MultiPolygon::new(polygons))
            }
            GeometryObject::GeometryCollection { geometries } => {
                let members = geometries
                    .into_iter()
                    .map(GeometryObject::into_geometry)
                    .collect::<Result<Vec<_>, _>>()?;
                Geometry::GeometryCollection(GeometryCollection::new_from(members))
            }
        })
    }
}

fn coord(position: &[f64]) -> Result<Coord<f64>, GeoJsonError> {
    match position {
        // Anything past x and y (elevation, measure) is dropped
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeoJsonError::InvalidPosition(position.len())),
    }
}

fn line_string(positions: &[Position]) -> Result<LineString<f64>, GeoJsonError> {
    let coords = positions.iter().map(|p| coord(p)).collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, GeoJsonError> {
    let mut rings = rings.iter().map(|ring| line_string(ring));
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(Vec::new()));
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

// ============================================================================
// ENCODING
// ============================================================================

fn ring_positions(ring: &LineString<f64>) -> Vec<Position> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_positions)
        .collect()
}
