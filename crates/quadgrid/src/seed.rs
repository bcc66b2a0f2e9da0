//! Initial coarse coverage of the region's bounding box.
//!
//! The seed grid is centered over the box: whatever is left over after
//! fitting whole cells across an axis is split evenly between both ends, so
//! no edge of the region gets systematically tighter cells than the other.

use std::collections::VecDeque;

use crate::error::InvalidRectangle;
use crate::rect::Rectangle;

/// Where the seed grid sits and how many cells it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedLayout {
    /// `floor(width / cell_size) + 1`.
    pub x_count: usize,
    /// `floor(height / cell_size) + 1`.
    pub y_count: usize,
    /// Lower-left corner of the first seed cell.
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_size: f64,
}

impl SeedLayout {
    /// Lay out seed cells of side `cell_size` over `bbox`.
    pub fn new(bbox: &Rectangle, cell_size: f64) -> Self {
        let (width, height) = (bbox.width(), bbox.height());

        // One extra cell per axis as a margin against boundary alignment.
        // Float -> usize casts saturate, so a pathological ratio cannot wrap.
        let x_count = (width / cell_size).floor() as usize + 1;
        let y_count = (height / cell_size).floor() as usize + 1;

        let x_remainder = width % cell_size;
        let y_remainder = height % cell_size;

        Self {
            x_count,
            y_count,
            origin_x: bbox.x_min() - x_remainder / 2.0,
            origin_y: bbox.y_min() - y_remainder / 2.0,
            cell_size,
        }
    }

    /// Number of seed cells: `(x_count + 1) * (y_count + 1)`.
    pub fn cell_count(&self) -> usize {
        self.x_count.saturating_add(1).saturating_mul(self.y_count.saturating_add(1))
    }

    /// The seed cell in column `i`, row `j`.
    ///
    /// Bounds are computed from the origin each time rather than by
    /// accumulating steps, so rounding error does not drift across the grid.
    pub fn cell(&self, i: usize, j: usize) -> Result<Rectangle, InvalidRectangle> {
        let size = self.cell_size;
        Rectangle::new(
            self.origin_x + i as f64 * size,
            self.origin_x + (i + 1) as f64 * size,
            self.origin_y + j as f64 * size,
            self.origin_y + (j + 1) as f64 * size,
        )
    }
}

/// Fill a fresh candidate queue with the seed coverage of `bbox`.
///
/// Cells are queued column by column (outer loop over x). The first invalid
/// cell aborts seeding; nothing partial is returned.
pub fn seed_queue(bbox: &Rectangle, max_grid_size: f64) -> Result<VecDeque<Rectangle>, InvalidRectangle> {
    let layout = SeedLayout::new(bbox, max_grid_size);
    let mut queue = VecDeque::new();

    for i in 0..=layout.x_count {
        for j in 0..=layout.y_count {
            queue.push_back(layout.cell(i, j)?);
        }
    }

    Ok(queue)
}
