//! # quadgrid
//!
//! Adaptive quadtree grids over polygonal regions: coarse square cells far
//! from the region's outline, progressively finer cells near it, optionally
//! clipped to the exact outline.
//!
//! ```text
//! ┌────────┬────────┐
//! │        ├──┬──┬──┤   big cells inside,
//! │        ├──┼──┼──┤   small cells along the boundary
//! ├────┬───┼──┴──┴──┘
//! │    │   │
//! └────┴───┘
//! ```
//!
//! The pipeline lives in [`grid`]; each stage has its own module so it can
//! be tested on its own. Geometry predicates go through the
//! [`GeometryEngine`] trait, with [`GeoEngine`] as the default.

pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod geojson;
pub mod grid;
pub mod rect;
pub mod refine;
pub mod region;
pub mod seed;
pub mod stats;

// Re-export common types at crate root for convenience.
pub use assemble::assemble;
pub use config::{DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, GridConfig};
pub use engine::{GeoEngine, GeometryEngine, Region};
pub use error::{ConfigError, GenerationStage, GeoJsonError, GridError, InvalidRectangle, RegionError};
pub use geojson::{parse_geometry, to_geojson, to_geojson_string};
pub use grid::{GridOutput, QuadtreeGrid, generate_grid};
pub use rect::Rectangle;
pub use refine::{ClassifiedCell, refine};
pub use region::{parse_region, prepare_region};
pub use seed::{SeedLayout, seed_queue};
pub use stats::GridStats;
