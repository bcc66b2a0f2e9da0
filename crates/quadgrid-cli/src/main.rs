//! quadgrid - adaptive quadtree grids over GeoJSON regions
//!
//! Usage:
//!   quadgrid grid <geojson|-> [options]       Generate a grid
//!   quadgrid benchmark <geojson|-> [options]  Time repeated generation
//!
//! Exit status is 0 on success, 2 when the input or parameters are at
//! fault, 1 for everything else.

mod cli;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use quadgrid::{ConfigError, GridError, RegionError};
use tracing_subscriber::EnvFilter;

use cli::{BenchmarkArgs, GridArgs, cmd_benchmark, cmd_grid};

#[derive(Parser, Debug)]
#[command(name = "quadgrid", version, about = "Adaptive quadtree grids over GeoJSON regions")]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a grid for a region
    Grid(GridArgs),
    /// Time repeated grid generation
    Benchmark(BenchmarkArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Grid(args) => cmd_grid(args),
        Command::Benchmark(args) => cmd_benchmark(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Logs go to stderr so stdout stays clean for the grid itself.
/// `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "quadgrid=info,quadgrid_cli=info",
        1 => "quadgrid=debug,quadgrid_cli=debug",
        _ => "quadgrid=trace,quadgrid_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ## Rust Lesson #6: Downcasting anyhow Errors
//
// `anyhow::Error` erases the concrete type, but keeps it around:
// `downcast_ref` recovers it (even through `.context()` layers), so the
// commands can use `?` freely and only this one place decides exit codes.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(grid) = err.downcast_ref::<GridError>() {
        return if grid.is_caller_error() { 2 } else { 1 };
    }
    if err.downcast_ref::<ConfigError>().is_some() || err.downcast_ref::<RegionError>().is_some() {
        return 2;
    }
    1
}
