//! One grid run, end to end.
//!
//! ```text
//! config ─► validate
//! region ─► envelope ─► bbox ─► seed ─► refine ─► assemble ─► MultiPolygon
//!                                        ▲
//!                          boundary ─────┘
//! ```

use std::time::Instant;

use geo_types::MultiPolygon;
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::config::GridConfig;
use crate::engine::{GeoEngine, GeometryEngine, Region};
use crate::error::{ConfigError, GenerationStage, GridError};
use crate::rect::Rectangle;
use crate::refine::refine;
use crate::seed::seed_queue;
use crate::stats::GridStats;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOutput {
    /// Generated cells: full squares or region-clipped fragments.
    pub cells: MultiPolygon<f64>,
    pub stats: GridStats,
}

/// A validated configuration bound to a geometry engine.
///
/// ```
/// use geo_types::{polygon, MultiPolygon};
/// use quadgrid::{GridConfig, QuadtreeGrid};
///
/// let region = MultiPolygon::new(vec![polygon![
///     (x: 0.0, y: 0.0),
///     (x: 1.0, y: 0.0),
///     (x: 1.0, y: 1.0),
///     (x: 0.0, y: 1.0),
/// ]]);
/// let grid = QuadtreeGrid::new(GridConfig::new().with_max_grid_size(1.0).with_min_grid_size(0.5))?;
/// let output = grid.generate(&region)?;
/// assert_eq!(output.cells.0.len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct QuadtreeGrid<E = GeoEngine> {
    config: GridConfig,
    engine: E,
}

impl QuadtreeGrid<GeoEngine> {
    /// Validate `config` and pair it with the `geo`-backed engine.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        Self::with_engine(config, GeoEngine)
    }
}

impl<E: GeometryEngine> QuadtreeGrid<E> {
    /// Validate `config` and pair it with a custom engine.
    pub fn with_engine(config: GridConfig, engine: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Cover `region` with an adaptive grid.
    ///
    /// All or nothing: any invalid rectangle along the way fails the run and
    /// no partial grid is returned.
    pub fn generate(&self, region: &Region) -> Result<GridOutput, GridError> {
        let started = Instant::now();
        let config = &self.config;
        let mut stats = GridStats::default();

        let envelope = self.engine.envelope(region).ok_or(GridError::EmptyRegion)?;
        let bbox = Rectangle::from_envelope(envelope)
            .map_err(|e| GridError::generation(GenerationStage::Envelope, e))?;

        let queue = seed_queue(&bbox, config.max_grid_size)
            .map_err(|e| GridError::generation(GenerationStage::Seeding, e))?;
        stats.seeded = queue.len();
        debug!(
            seeded = stats.seeded,
            width = bbox.width(),
            height = bbox.height(),
            cell_size = config.max_grid_size,
            "seeded coarse grid"
        );

        let boundary = self.engine.boundary(region);
        let cells = refine(&self.engine, queue, region, &boundary, config.min_grid_size, &mut stats)
            .map_err(|e| GridError::generation(GenerationStage::Refinement, e))?;
        debug!(
            processed = stats.processed,
            subdivided = stats.subdivided,
            boundary = stats.boundary_cells,
            interior = stats.interior_cells,
            discarded = stats.discarded,
            max_depth = stats.max_depth,
            "refinement complete"
        );

        let output = assemble(&self.engine, &cells, region, config.clip, &mut stats);

        info!(
            polygons = stats.output_polygons,
            dropped = stats.dropped_fragments,
            clip = config.clip,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "grid generated"
        );

        Ok(GridOutput { cells: output, stats })
    }
}

/// Validate `config` and run it over `region` with [`GeoEngine`].
pub fn generate_grid(region: &Region, config: &GridConfig) -> Result<GridOutput, GridError> {
    QuadtreeGrid::new(*config)?.generate(region)
}
