//! Grid generation parameters.

use crate::error::ConfigError;

/// Default smallest cell side.
pub const DEFAULT_MIN_GRID_SIZE: f64 = 0.25;
/// Default coarse (seed) cell side.
pub const DEFAULT_MAX_GRID_SIZE: f64 = 5.0;

/// Configuration for one grid run.
///
/// Use the builder methods, then [`GridConfig::validate`] (the grid
/// constructors call it for you).
///
/// ```
/// use quadgrid::GridConfig;
///
/// let config = GridConfig::new()
///     .with_max_grid_size(2.0)
///     .with_min_grid_size(0.125)
///     .with_clip(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.refinement_depth(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Cells touching the boundary stop splitting once half their side drops below this.
    pub min_grid_size: f64,

    /// Side of the seed cells.
    pub max_grid_size: f64,

    /// Clip boundary cells to the exact region outline.
    pub clip: bool,

    /// Optional cap on `refinement_depth()`, for callers that need bounded work.
    pub depth_limit: Option<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_grid_size: DEFAULT_MIN_GRID_SIZE,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            clip: true,
            depth_limit: None,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_grid_size(mut self, size: f64) -> Self {
        self.min_grid_size = size;
        self
    }

    #[must_use]
    pub fn with_max_grid_size(mut self, size: f64) -> Self {
        self.max_grid_size = size;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    #[must_use]
    pub fn with_depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    /// Check the size invariants: both sizes finite and positive, `max > min`,
    /// and the implied depth within `depth_limit` if one is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("minGridSize", self.min_grid_size),
            ("maxGridSize", self.max_grid_size),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteSize { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveSize { name, value });
            }
        }

        if self.max_grid_size <= self.min_grid_size {
            return Err(ConfigError::MaxNotAboveMin {
                min: self.min_grid_size,
                max: self.max_grid_size,
            });
        }

        if let Some(limit) = self.depth_limit {
            let depth = self.refinement_depth();
            if depth > limit {
                return Err(ConfigError::DepthLimitExceeded { depth, limit });
            }
        }

        Ok(())
    }

    /// Upper bound on how many times a seed cell can be split:
    /// `ceil(log2(max_grid_size / min_grid_size))`.
    ///
    /// Only meaningful for a config that passes [`validate`](Self::validate).
    pub fn refinement_depth(&self) -> u32 {
        let ratio = self.max_grid_size / self.min_grid_size;
        if !(ratio > 1.0) {
            return 0;
        }
        // Saturating cast: absurd ratios clamp rather than wrap
        ratio.log2().ceil() as u32
    }
}
