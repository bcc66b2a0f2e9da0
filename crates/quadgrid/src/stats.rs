//! Counters collected over one grid run.

use serde::Serialize;

/// What happened during a run. Every counter starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GridStats {
    /// Seed cells placed over the bounding box.
    pub seeded: usize,
    /// Cells taken off the candidate queue and classified.
    pub processed: usize,
    /// Boundary cells split into four children.
    pub subdivided: usize,
    /// Cells accepted at the size floor while touching the boundary.
    pub boundary_cells: usize,
    /// Cells accepted as lying fully inside the region.
    pub interior_cells: usize,
    /// Cells outside the region, dropped.
    pub discarded: usize,
    /// Deepest refinement level reached (seeds are level 0).
    pub max_depth: u32,
    /// Polygons in the final output.
    pub output_polygons: usize,
    /// Degenerate clip results (lines, points, empty) dropped during assembly.
    pub dropped_fragments: usize,
}

impl GridStats {
    /// Cells that made it through refinement.
    pub fn accepted(&self) -> usize {
        self.boundary_cells + self.interior_cells
    }
}
