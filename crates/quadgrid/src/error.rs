//! Error types for grid generation.
//!
//! ## Rust Lesson #4: thiserror
//!
//! Every error here is a plain enum or struct. `#[derive(Error)]` writes the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
//! and `#[from]` / `#[source]` wire up `?` conversion and error chains.
//!
//! The split mirrors who is at fault:
//! - [`ConfigError`] and [`RegionError`] = the caller handed us bad input
//! - [`GridError::Generation`] = a numerical edge case inside the run

use thiserror::Error;

/// A rectangle whose bounds violate `min < max` on some axis, or are not finite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid rectangle: x [{x_min}, {x_max}], y [{y_min}, {y_max}] (need finite bounds with min < max)")]
pub struct InvalidRectangle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Problems with a [`GridConfig`](crate::GridConfig), reported before any geometry work.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A grid size is zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f64 },

    /// A grid size is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteSize { name: &'static str, value: f64 },

    /// `max_grid_size` does not exceed `min_grid_size`.
    #[error("maxGridSize ({max}) must be greater than minGridSize ({min})")]
    MaxNotAboveMin { min: f64, max: f64 },

    /// The size ratio would refine deeper than the configured limit allows.
    #[error("refinement depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: u32, limit: u32 },
}

/// Which phase of a run hit an invalid rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Deriving the bounding box from the region envelope.
    Envelope,
    /// Building the initial coarse coverage.
    Seeding,
    /// Subdividing boundary cells.
    Refinement,
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GenerationStage::Envelope => "envelope",
            GenerationStage::Seeding => "seeding",
            GenerationStage::Refinement => "refinement",
        };
        f.write_str(name)
    }
}

/// Failure of a whole grid run. No partial grid accompanies any variant.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The geometry engine found no envelope (the region has no coordinates).
    #[error("region is empty")]
    EmptyRegion,

    /// An invalid rectangle aborted the run.
    #[error("grid generation failed during {stage}")]
    Generation {
        stage: GenerationStage,
        #[source]
        source: InvalidRectangle,
    },
}

impl GridError {
    pub(crate) fn generation(stage: GenerationStage, source: InvalidRectangle) -> Self {
        GridError::Generation { stage, source }
    }

    /// True when the caller supplied the bad input (configuration or empty region),
    /// false for internal generation failures.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, GridError::Config(_) | GridError::EmptyRegion)
    }
}

/// Problems decoding a GeoJSON document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeoJsonError {
    #[error("GeoJSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `Feature` with a null geometry.
    #[error("feature has no geometry")]
    MissingGeometry,

    /// A position with fewer than two ordinates.
    #[error("position must have at least 2 coordinates, got {0}")]
    InvalidPosition(usize),
}

/// Reasons an input geometry cannot be used as a region.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegionError {
    #[error(transparent)]
    GeoJson(#[from] GeoJsonError),

    #[error("invalid input geometry type {found}, must be Polygon or MultiPolygon")]
    UnsupportedGeometry { found: &'static str },

    #[error("region is empty after repair")]
    Empty,

    #[error("region is invalid after repair: {reason}")]
    Invalid { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_keeps_source() {
        use std::error::Error as _;

        let rect = InvalidRectangle { x_min: 1.0, x_max: 1.0, y_min: 0.0, y_max: 2.0 };
        let err = GridError::generation(GenerationStage::Refinement, rect);
        assert_eq!(err.to_string(), "grid generation failed during refinement");
        assert!(err.source().is_some());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn config_error_is_caller_error() {
        let err: GridError = ConfigError::MaxNotAboveMin { min: 1.0, max: 1.0 }.into();
        assert!(err.is_caller_error());
        assert!(err.to_string().contains("maxGridSize"));
    }
}
