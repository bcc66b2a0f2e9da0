//! CLI command implementations.
//!
//! - `grid` - Generate an adaptive grid for a GeoJSON region
//! - `benchmark` - Time repeated grid generation over one region

pub mod benchmark;
pub mod common;
pub mod grid;

pub use benchmark::{BenchmarkArgs, cmd_benchmark};
pub use grid::{GridArgs, cmd_grid};
