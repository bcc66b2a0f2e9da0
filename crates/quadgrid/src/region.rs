//! Preparing an input geometry for grid generation.
//!
//! Steps, in order:
//! 1. Only `Polygon` and `MultiPolygon` are accepted.
//! 2. Non-finite coordinates -> rejected.
//! 3. Repair: repeated vertices are collapsed, self-intersecting rings are
//!    split into simple pieces, overlapping members are merged, and
//!    anything left without area is dropped.
//! 4. Empty after repair -> rejected.

use geo::{Area, BooleanOps, RemoveRepeatedPoints};
use geo_types::{Geometry, LineString, MultiPolygon, Polygon};
use tracing::warn;

use crate::engine::Region;
use crate::error::RegionError;
use crate::geojson::parse_geometry;

/// Decode GeoJSON and prepare it as a region.
pub fn parse_region(json: &str) -> Result<Region, RegionError> {
    prepare_region(parse_geometry(json)?)
}

/// Type-check, repair and validate a geometry for use as a region.
pub fn prepare_region(geometry: Geometry<f64>) -> Result<Region, RegionError> {
    let multi = match geometry {
        Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
        Geometry::MultiPolygon(multi) => multi,
        other => {
            return Err(RegionError::UnsupportedGeometry { found: geometry_type_name(&other) });
        }
    };

    // The boolean overlay below needs finite input
    let finite = multi
        .iter()
        .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
        .flat_map(LineString::coords)
        .all(|c| c.x.is_finite() && c.y.is_finite());
    if !finite {
        return Err(RegionError::Invalid { reason: "non-finite coordinate".to_string() });
    }

    let before = multi.0.len();
    let repaired = repair(multi);
    if repaired.0.len() != before {
        warn!(before, after = repaired.0.len(), "region polygons changed during repair");
    }

    if repaired.0.is_empty() {
        return Err(RegionError::Empty);
    }

    Ok(repaired)
}

/// GeoJSON name of a geometry's type.
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn repair(multi: MultiPolygon<f64>) -> MultiPolygon<f64> {
    let cleaned: MultiPolygon<f64> = multi
        .remove_repeated_points()
        .into_iter()
        .filter(|poly| poly.exterior().0.len() >= 4)
        .collect();

    // A union with nothing rebuilds every ring from the overlay graph: a
    // bowtie comes back as its two lobes, overlapping members as one.
    let normalized = cleaned.union(&MultiPolygon::new(Vec::new()));

    normalized
        .into_iter()
        .filter(|poly| encloses_area(poly.exterior()))
        .map(|poly| {
            let (exterior, interiors) = poly.into_inner();
            let interiors = interiors.into_iter().filter(encloses_area).collect();
            Polygon::new(exterior, interiors)
        })
        .collect()
}

/// A closed ring needs 4 coordinates (3 distinct + closing) and positive area.
///
/// Only meaningful for simple rings; self-intersecting lobes can cancel out.
fn encloses_area(ring: &LineString<f64>) -> bool {
    ring.0.len() >= 4 && Polygon::new(ring.clone(), Vec::new()).unsigned_area() > 0.0
}
