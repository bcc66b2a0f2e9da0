//! Integration tests for the quadgrid CLI.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use approx::assert_relative_eq;
use geo::Area;
use geo_types::Geometry;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quadgrid"))
}

/// Get the path to a file under test_assets/ at the repo root.
fn asset(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from quadgrid-cli to crates
    path.pop(); // Go up from crates to repo root
    path.push("test_assets");
    path.push(name);
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn grid_of(output: &Output) -> Geometry<f64> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    quadgrid::parse_geometry(&stdout).expect("stdout should be GeoJSON")
}

#[test]
fn grid_command_covers_square_exactly() {
    let path = asset("square.geojson");
    let output = run(&["grid", path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let grid = grid_of(&output);
    assert!(matches!(grid, Geometry::MultiPolygon(_)));
    assert_relative_eq!(grid.unsigned_area(), 100.0, epsilon = 1e-6);
}

#[test]
fn grid_command_accepts_features() {
    let path = asset("l_shape.geojson");
    let output = run(&["grid", path.to_str().unwrap(), "--max-grid-size", "4", "--min-grid-size", "0.5"]);

    assert!(output.status.success());
    assert_relative_eq!(grid_of(&output).unsigned_area(), 64.0, epsilon = 1e-6);
}

#[test]
fn grid_command_respects_holes() {
    let path = asset("donut.geojson");
    let output = run(&["grid", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_relative_eq!(grid_of(&output).unsigned_area(), 84.0, epsilon = 1e-6);
}

#[test]
fn no_clip_emits_whole_squares() {
    let path = asset("donut.geojson");
    let output = run(&["grid", path.to_str().unwrap(), "--no-clip"]);

    assert!(output.status.success());
    let Geometry::MultiPolygon(cells) = grid_of(&output) else {
        panic!("expected a MultiPolygon");
    };
    assert!(!cells.0.is_empty());
    for cell in &cells {
        assert_eq!(cell.exterior().0.len(), 5, "every cell should be a closed square");
        assert!(cell.interiors().is_empty());
    }
    assert!(cells.unsigned_area() > 84.0);
}

#[test]
fn grid_command_reads_stdin() {
    let square = std::fs::read_to_string(asset("square.geojson")).unwrap();

    let mut child = Command::new(binary_path())
        .args(["grid", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child.stdin.take().unwrap().write_all(square.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_relative_eq!(grid_of(&output).unsigned_area(), 100.0, epsilon = 1e-6);
}

#[test]
fn svg_format_produces_svg() {
    let path = asset("square.geojson");
    let output = run(&["grid", path.to_str().unwrap(), "-f", "svg"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<svg"), "Output should contain SVG element");
    assert!(stdout.contains("<path"), "Output should contain paths");
}

#[test]
fn stats_go_to_stderr() {
    let path = asset("square.geojson");
    let output = run(&["grid", path.to_str().unwrap(), "--stats"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"seeded\": 16"), "stderr: {stderr}");
    // stdout still holds nothing but the grid
    grid_of(&output);
}

#[test]
fn output_file_is_written() {
    let path = asset("square.geojson");
    let out = std::env::temp_dir().join(format!("quadgrid-test-{}.geojson", std::process::id()));
    let output = run(&["grid", path.to_str().unwrap(), "-o", out.to_str().unwrap()]);

    assert!(output.status.success());
    let written = std::fs::read_to_string(&out).unwrap();
    std::fs::remove_file(&out).ok();
    assert!(written.contains("MultiPolygon"));
}

#[test]
fn wrong_geometry_type_exits_with_two() {
    let path = asset("line.geojson");
    let output = run(&["grid", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must be Polygon or MultiPolygon"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn bad_sizes_exit_with_two() {
    let path = asset("square.geojson");
    let output = run(&["grid", path.to_str().unwrap(), "--max-grid-size", "1", "--min-grid-size", "2"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run(&["grid", path.to_str().unwrap(), "--min-grid-size", "-1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be positive"));
}

#[test]
fn missing_file_exits_with_one() {
    let output = run(&["grid", "/nonexistent/region.geojson"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn benchmark_prints_summary() {
    let path = asset("square.geojson");
    let output = run(&["benchmark", path.to_str().unwrap(), "-n", "2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("QUADGRID BENCHMARK"));
    assert!(stdout.contains("Iterations: 2"));
}
