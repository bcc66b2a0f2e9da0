//! Turning classified cells into the output multi-polygon.

use geo_types::{Geometry, MultiPolygon, Polygon};

use crate::engine::{GeometryEngine, Region};
use crate::refine::ClassifiedCell;
use crate::stats::GridStats;

/// Build the output collection, in cell order.
///
/// Boundary cells are clipped to the region when `clip` is set; everything
/// else is emitted as its raw square.
pub fn assemble<E: GeometryEngine>(
    engine: &E,
    cells: &[ClassifiedCell],
    region: &Region,
    clip: bool,
    stats: &mut GridStats,
) -> MultiPolygon<f64> {
    let mut polygons = Vec::with_capacity(cells.len());

    for cell in cells {
        let square = cell.rect.as_polygon();
        if clip && cell.touches_boundary {
            let clipped = engine.intersection(&square, region);
            if !flatten_into(clipped, &mut polygons) {
                stats.dropped_fragments += 1;
            }
        } else {
            polygons.push(square);
        }
    }

    stats.output_polygons = polygons.len();
    MultiPolygon::new(polygons)
}

/// Append the polygonal parts of `geometry` to `out`.
///
/// Polygons go in as-is, multi-polygons member by member. Anything else
/// (lines, points, empty collections) is what clipping leaves behind when
/// a cell only grazes the region; it is skipped. Returns whether anything
/// was appended.
pub fn flatten_into(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) -> bool {
    // ## Rust Lesson #5: Exhaustive Matching With a Catch-all
    //
    // `Geometry` has many variants. We name the two we keep and let `_`
    // swallow the rest - adding a variant upstream can't break this.
    match geometry {
        Geometry::Polygon(polygon) => {
            out.push(polygon);
            true
        }
        Geometry::MultiPolygon(multi) if !multi.0.is_empty() => {
            out.extend(multi);
            true
        }
        _ => false,
    }
}
