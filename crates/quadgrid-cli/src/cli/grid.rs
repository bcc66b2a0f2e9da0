//! Grid command implementation.

use anyhow::Result;
use clap::Args;
use quadgrid::{QuadtreeGrid, parse_region, to_geojson_string};
use tracing::info;

use super::common::{GridOptions, OutputFormat, cells_to_svg, read_input, write_output};

#[derive(Args, Debug)]
pub struct GridArgs {
    /// GeoJSON Polygon, MultiPolygon or Feature ('-' for stdin)
    #[arg(default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub options: GridOptions,

    /// Output file ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Geojson)]
    pub format: OutputFormat,

    /// Print run statistics as JSON on stderr
    #[arg(long)]
    pub stats: bool,
}

/// Execute the grid command.
pub fn cmd_grid(args: &GridArgs) -> Result<()> {
    // Bad parameters are reported before the input is even read
    let grid = QuadtreeGrid::new(args.options.to_config())?;

    let text = read_input(&args.input)?;
    let region = parse_region(&text)?;
    info!(input = %args.input, polygons = region.0.len(), "loaded region");

    let output = grid.generate(&region)?;

    let rendered = match args.format {
        OutputFormat::Geojson => to_geojson_string(&output.cells),
        OutputFormat::Svg => cells_to_svg(&output.cells, &region),
    };
    write_output(&args.output, &rendered)?;

    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(&output.stats)?);
    }
    Ok(())
}
