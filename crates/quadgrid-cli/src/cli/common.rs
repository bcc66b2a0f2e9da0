//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use geo_types::{LineString, MultiPolygon, Polygon};
use quadgrid::{DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, GridConfig, Region};

/// Output format for generated cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// GeoJSON MultiPolygon geometry
    Geojson,
    /// SVG preview with the region outline underneath
    Svg,
}

/// Grid parameters shared by `grid` and `benchmark`.
#[derive(Args, Debug, Clone)]
pub struct GridOptions {
    /// Side length of the seed cells
    #[arg(long, default_value_t = DEFAULT_MAX_GRID_SIZE, allow_negative_numbers = true)]
    pub max_grid_size: f64,

    /// Smallest side a boundary cell may be split down to
    #[arg(long, default_value_t = DEFAULT_MIN_GRID_SIZE, allow_negative_numbers = true)]
    pub min_grid_size: f64,

    /// Emit boundary cells as whole squares instead of clipping them
    #[arg(long)]
    pub no_clip: bool,

    /// Refuse configurations that would subdivide deeper than this
    #[arg(long)]
    pub depth_limit: Option<u32>,
}

impl GridOptions {
    pub fn to_config(&self) -> GridConfig {
        let config = GridConfig::new()
            .with_min_grid_size(self.min_grid_size)
            .with_max_grid_size(self.max_grid_size)
            .with_clip(!self.no_clip);
        match self.depth_limit {
            Some(limit) => config.with_depth_limit(limit),
            None => config,
        }
    }
}

/// Read GeoJSON text from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    }
}

/// Write to a file, or to stdout when `path` is `-`.
pub fn write_output(path: &str, content: &str) -> Result<()> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}").context("failed to write to stdout")?;
    } else {
        fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
        tracing::info!(path, "wrote output");
    }
    Ok(())
}

// ============================================================================
// SVG PREVIEW
// ============================================================================

/// Render cells over the region outline as a standalone SVG document.
///
/// Geographic y grows upward, SVG y grows downward, so every y is negated
/// and the viewBox is built in the flipped space.
pub fn cells_to_svg(cells: &MultiPolygon<f64>, region: &Region) -> String {
    let (min_x, min_y, max_x, max_y) = bounds(region.iter().chain(cells.iter()));
    let width = (max_x - min_x).max(f64::EPSILON);
    let height = (max_y - min_y).max(f64::EPSILON);
    let pad = width.max(height) * 0.02;
    let stroke = width.max(height) / 500.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">
<g fill="#dde8f0" stroke="#888888" stroke-width="{}" fill-rule="evenodd">
"##,
        min_x - pad,
        -max_y - pad,
        width + 2.0 * pad,
        height + 2.0 * pad,
        stroke * 2.0,
    ));
    for polygon in region {
        svg.push_str(&format!("  <path d=\"{}\"/>\n", polygon_path(polygon)));
    }
    svg.push_str("</g>\n");

    svg.push_str(&format!(
        "<g fill=\"none\" stroke=\"black\" stroke-width=\"{}\">\n",
        stroke
    ));
    for polygon in cells {
        svg.push_str(&format!("  <path d=\"{}\"/>\n", polygon_path(polygon)));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn polygon_path(polygon: &Polygon<f64>) -> String {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_path)
        .collect::<Vec<_>>()
        .join(" ")
}

fn ring_path(ring: &LineString<f64>) -> String {
    let mut d = String::new();
    for (i, c) in ring.coords().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.6},{:.6} ", cmd, c.x, -c.y));
    }
    d.push('Z');
    d
}

fn bounds<'a>(polygons: impl Iterator<Item = &'a Polygon<f64>>) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for c in polygons.flat_map(|p| p.exterior().coords()) {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    if min_x > max_x {
        return (0.0, 0.0, 1.0, 1.0);
    }
    (min_x, min_y, max_x, max_y)
}
