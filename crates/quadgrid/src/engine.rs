//! The geometry engine seam.
//!
//! Grid generation never does polygon math itself. It asks an engine for
//! four things: the region envelope, the region boundary, two intersection
//! tests, and the clipped intersection of a cell with the region.
//!
//! [`GeoEngine`] answers them with the `geo` crate. Tests can wrap it to count
//! calls or inject failures.

use geo::{Area, BooleanOps, BoundingRect, Intersects};
use geo_types::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon, Polygon, Rect};

/// The region being covered. A single polygon is lifted into a one-member multi-polygon.
pub type Region = MultiPolygon<f64>;

/// Clip fragments whose area falls below this fraction of the cell area are
/// treated as precision artifacts (slivers along a shared edge).
const SLIVER_AREA_RATIO: f64 = 1e-12;

/// Geometric predicates consumed by the grid generator.
///
/// Implementations must be deterministic and free of shared mutable state;
/// a run calls them many times in a tight loop.
pub trait GeometryEngine {
    /// Axis-aligned envelope of the region, `None` when it has no coordinates.
    fn envelope(&self, region: &Region) -> Option<Rect<f64>>;

    /// The region outline: every exterior and interior ring.
    fn boundary(&self, region: &Region) -> MultiLineString<f64>;

    /// Does the cell (including its edges) touch or contain any part of the boundary?
    fn intersects_boundary(&self, cell: &Polygon<f64>, boundary: &MultiLineString<f64>) -> bool;

    /// Does the cell share any point with the region?
    fn intersects_region(&self, cell: &Polygon<f64>, region: &Region) -> bool;

    /// The part of the cell inside the region.
    ///
    /// May be a polygon, a multi-polygon, or a degenerate geometry when the
    /// cell only grazes the region.
    fn intersection(&self, cell: &Polygon<f64>, region: &Region) -> Geometry<f64>;
}

/// [`GeometryEngine`] backed by the `geo` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn envelope(&self, region: &Region) -> Option<Rect<f64>> {
        region.bounding_rect()
    }

    fn boundary(&self, region: &Region) -> MultiLineString<f64> {
        let rings: Vec<LineString<f64>> = region
            .iter()
            .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors()))
            .cloned()
            .collect();
        MultiLineString::new(rings)
    }

    fn intersects_boundary(&self, cell: &Polygon<f64>, boundary: &MultiLineString<f64>) -> bool {
        boundary.iter().any(|ring| cell.intersects(ring))
    }

    fn intersects_region(&self, cell: &Polygon<f64>, region: &Region) -> bool {
        region.iter().any(|poly| cell.intersects(poly))
    }

    fn intersection(&self, cell: &Polygon<f64>, region: &Region) -> Geometry<f64> {
        let min_area = cell.unsigned_area() * SLIVER_AREA_RATIO;
        let mut clipped: Vec<Polygon<f64>> = MultiPolygon::new(vec![cell.clone()])
            .intersection(region)
            .into_iter()
            .filter(|poly| poly.unsigned_area() > min_area)
            .collect();

        // One piece is a bare polygon, several a multi-polygon, none an empty collection
        match clipped.len() {
            0 => Geometry::GeometryCollection(GeometryCollection::new_from(Vec::new())),
            1 => Geometry::Polygon(clipped.remove(0)),
            _ => Geometry::MultiPolygon(MultiPolygon::new(clipped)),
        }
    }
}
