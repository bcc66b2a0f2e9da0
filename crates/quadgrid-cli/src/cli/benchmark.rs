//! Benchmark command implementation.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::Args;
use quadgrid::{GridStats, QuadtreeGrid, parse_region};

use super::common::{GridOptions, read_input};

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// GeoJSON Polygon, MultiPolygon or Feature ('-' for stdin)
    #[arg(default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub options: GridOptions,

    /// Number of timed runs
    #[arg(short = 'n', long, default_value_t = 10)]
    pub iterations: u32,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchmarkArgs) -> Result<()> {
    if args.iterations == 0 {
        bail!("--iterations must be at least 1");
    }
    let grid = QuadtreeGrid::new(args.options.to_config())?;

    let start_load = Instant::now();
    let text = read_input(&args.input)?;
    let region = parse_region(&text)?;
    let load_time = start_load.elapsed();
    println!("Loaded {} polygons in {:?}", region.0.len(), load_time);

    let mut timings = Vec::with_capacity(args.iterations as usize);
    let mut stats = GridStats::default();
    for _ in 0..args.iterations {
        let start = Instant::now();
        stats = grid.generate(&region)?.stats;
        timings.push(start.elapsed());
    }

    let total: Duration = timings.iter().sum();
    let mean = total / args.iterations;
    let fastest = timings.iter().min().copied().unwrap_or_default();
    let slowest = timings.iter().max().copied().unwrap_or_default();
    let config = grid.config();

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  QUADGRID BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Grid sizes: {} -> {}", config.max_grid_size, config.min_grid_size);
    println!("  Clip: {}", config.clip);
    println!("  Iterations: {}", args.iterations);
    println!("  Cells processed: {}", stats.processed);
    println!("  Output polygons: {}", stats.output_polygons);
    println!("  Max depth: {}", stats.max_depth);
    println!("  Mean: {:.2}ms", mean.as_secs_f64() * 1000.0);
    println!("  Fastest: {:.2}ms", fastest.as_secs_f64() * 1000.0);
    println!("  Slowest: {:.2}ms", slowest.as_secs_f64() * 1000.0);
    println!("═══════════════════════════════════════════════");

    Ok(())
}
