//! Dashboard and gesture configuration.
//!
//! Everything here deserializes with defaults, so a partial JSON document
//! (or none at all) yields a usable configuration.

use crate::timer::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 4;
/// Default row height as a fraction of the column width.
pub const DEFAULT_CELL_ASPECT_RATIO: f64 = 0.5;
/// How long the pointer must stay put before a press becomes a drag.
pub const DEFAULT_HOLD_DURATION_MS: u64 = 200;
/// Movement (per axis, in pixels) that turns a pending hold into a tap.
pub const DEFAULT_MIN_DRAG_DISTANCE: f64 = 10.0;
/// Minimum time between two resize recomputations.
pub const DEFAULT_RESIZE_THROTTLE_MS: u64 = 50;
/// Exponential smoothing weight applied to the horizontal resize delta.
pub const DEFAULT_SMOOTH_FACTOR: f64 = 0.2;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Grid must have at least one column")]
    NoColumns,
    #[error("Cell aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),
    #[error("Smoothing factor must be in (0, 1], got {0}")]
    InvalidSmoothFactor(f64),
    #[error("Minimum drag distance must be finite and positive, got {0}")]
    InvalidDragDistance(f64),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Immutable grid geometry of one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of equal-width columns.
    pub columns: u32,
    /// Row height as a fraction of the column width.
    pub cell_aspect_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            cell_aspect_ratio: DEFAULT_CELL_ASPECT_RATIO,
        }
    }
}

impl GridConfig {
    /// Create a grid configuration.
    pub fn new(columns: u32, cell_aspect_ratio: f64) -> Self {
        Self {
            columns,
            cell_aspect_ratio,
        }
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if !self.cell_aspect_ratio.is_finite() || self.cell_aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.cell_aspect_ratio));
        }
        Ok(())
    }
}

/// Thresholds and timings for drag and resize gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Hold time before a press is recognized as a drag (milliseconds).
    pub hold_duration_ms: u64,
    /// Per-axis movement in pixels that cancels a pending hold.
    pub min_drag_distance: f64,
    /// Resize recompute interval (milliseconds).
    pub resize_throttle_ms: u64,
    /// Weight of the newest sample in the horizontal resize smoothing.
    pub smooth_factor: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            min_drag_distance: DEFAULT_MIN_DRAG_DISTANCE,
            resize_throttle_ms: DEFAULT_RESIZE_THROTTLE_MS,
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
        }
    }
}

impl GestureConfig {
    /// Hold duration as a [`Duration`].
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }

    /// Resize throttle interval as a [`Duration`].
    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    /// Check the thresholds.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.smooth_factor > 0.0 && self.smooth_factor <= 1.0) {
            return Err(ConfigError::InvalidSmoothFactor(self.smooth_factor));
        }
        if !self.min_drag_distance.is_finite() || self.min_drag_distance <= 0.0 {
            return Err(ConfigError::InvalidDragDistance(self.min_drag_distance));
        }
        Ok(())
    }
}

/// Complete configuration for one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub grid: GridConfig,
    pub gestures: GestureConfig,
}

impl DashboardConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.grid.validate()?;
        self.gestures.validate()
    }
}
