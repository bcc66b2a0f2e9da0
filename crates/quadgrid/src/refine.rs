//! Adaptive breadth-first refinement.
//!
//! ## Rust Lesson #3: A Queue Instead of Recursion
//!
//! The textbook quadtree splits recursively. Here every pending cell sits
//! in a `VecDeque`: pop from the front, push children on the back. That
//! gives level-by-level (breadth-first) order, and the call stack never
//! grows no matter how deep the refinement goes.
//!
//! ```text
//! queue: [A, B]  ->  pop A, split  ->  [B, A1, A2, A3, A4]
//! ```

use std::collections::VecDeque;

use geo_types::MultiLineString;
use tracing::trace;

use crate::engine::{GeometryEngine, Region};
use crate::error::InvalidRectangle;
use crate::rect::Rectangle;
use crate::stats::GridStats;

/// A cell accepted into the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedCell {
    pub rect: Rectangle,
    /// Touches the region boundary, so it needs clipping. Cells with `false`
    /// lie fully inside the region.
    pub touches_boundary: bool,
    /// Refinement level the cell was accepted at (seeds are level 0).
    pub depth: u32,
}

/// Drain `queue`, splitting every boundary cell until half its side drops
/// below `min_grid_size`, and classify the survivors.
///
/// Cells are accepted in processing order. A failed subdivision aborts the
/// whole pass; cells accepted so far are dropped with it.
pub fn refine<E: GeometryEngine>(
    engine: &E,
    queue: VecDeque<Rectangle>,
    region: &Region,
    boundary: &MultiLineString<f64>,
    min_grid_size: f64,
    stats: &mut GridStats,
) -> Result<Vec<ClassifiedCell>, InvalidRectangle> {
    let mut pending: VecDeque<(Rectangle, u32)> = queue.into_iter().map(|rect| (rect, 0)).collect();
    let mut accepted = Vec::new();

    while let Some((rect, depth)) = pending.pop_front() {
        stats.processed += 1;
        stats.max_depth = stats.max_depth.max(depth);

        let polygon = rect.as_polygon();

        if engine.intersects_boundary(&polygon, boundary) {
            if rect.half_size() >= min_grid_size {
                let children = rect.subdivide()?;
                pending.extend(children.into_iter().map(|child| (child, depth + 1)));
                stats.subdivided += 1;
            } else {
                accepted.push(ClassifiedCell { rect, touches_boundary: true, depth });
                stats.boundary_cells += 1;
            }
        } else if engine.intersects_region(&polygon, region) {
            accepted.push(ClassifiedCell { rect, touches_boundary: false, depth });
            stats.interior_cells += 1;
        } else {
            stats.discarded += 1;
        }
    }

    trace!(processed = stats.processed, accepted = accepted.len(), "refinement drained queue");
    Ok(accepted)
}
