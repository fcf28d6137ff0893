//! Recognizer thresholds and application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TactileError, TactileResult};

/// Minimum distance (device-independent pixels) the primary point must travel before a pan.
pub const MINIMUM_MOTION_DISTANCE_BEFORE_PAN: f32 = 15.0;

/// Ratio of the minimum pan distance converted into smoothing steps.
pub const MINIMUM_MOTION_DISTANCE_TO_THRESHOLD_ADJUSTMENTS_RATIO: f32 = 2.0 / 3.0;

/// Maximum gap between touch events (ms). Not used to gate transitions.
pub const MAXIMUM_TIME_DIFF_ALLOWED_MS: u64 = 500;

/// A pan that starts later than this after the down event is "slow" and gets smoothed.
pub const MINIMUM_TIME_BEFORE_THRESHOLD_ADJUSTMENTS_MS: u64 = 100;

pub const MINIMUM_MOTION_EVENTS_BEFORE_PAN: u32 = 2;
pub const MINIMUM_TOUCHES_BEFORE_PAN: u32 = 1;
pub const MAXIMUM_TOUCHES_BEFORE_PAN: u32 = 1;

/// Which emitted gestures reach the registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Every emission is delivered, including `Possible` and a tap's `Cancelled`.
    #[default]
    All,
    /// Only emissions from `Started` up to and including the terminating
    /// `Finished`/`Cancelled` are delivered.
    PanningOnly,
}

/// Construction-time thresholds for the pan gesture recognizer.
///
/// Fixed for the lifetime of a recognizer. Call [`PanConfig::validate`]
/// before use; the recognizer constructor does this for you.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// Minimum number of touch points for a pan.
    pub minimum_touches: u32,

    /// Maximum number of touch points for a pan.
    pub maximum_touches: u32,

    /// Minimum displacement from the down position before a pan starts.
    pub minimum_distance: f32,

    /// Motion events required (in addition to distance) before a pan starts.
    pub minimum_motion_events: u32,

    /// Maximum inter-event gap in milliseconds.
    pub maximum_time_gap_ms: u64,

    /// Elapsed time since down above which threshold smoothing is armed.
    pub minimum_smoothing_delay_ms: u64,

    /// Fraction of `minimum_distance` used as the smoothing step budget.
    pub smoothing_step_ratio: f32,

    /// Handler delivery gate.
    pub delivery: DeliveryPolicy,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            minimum_touches: MINIMUM_TOUCHES_BEFORE_PAN,
            maximum_touches: MAXIMUM_TOUCHES_BEFORE_PAN,
            minimum_distance: MINIMUM_MOTION_DISTANCE_BEFORE_PAN,
            minimum_motion_events: MINIMUM_MOTION_EVENTS_BEFORE_PAN,
            maximum_time_gap_ms: MAXIMUM_TIME_DIFF_ALLOWED_MS,
            minimum_smoothing_delay_ms: MINIMUM_TIME_BEFORE_THRESHOLD_ADJUSTMENTS_MS,
            smoothing_step_ratio: MINIMUM_MOTION_DISTANCE_TO_THRESHOLD_ADJUSTMENTS_RATIO,
            delivery: DeliveryPolicy::All,
        }
    }
}

impl PanConfig {
    /// Check the touch-count bounds and distance/ratio values.
    pub fn validate(&self) -> TactileResult<()> {
        if self.minimum_touches < 1 {
            return Err(TactileError::config("minimum_touches must be at least 1"));
        }
        if self.minimum_touches > self.maximum_touches {
            return Err(TactileError::config(format!(
                "minimum_touches ({}) exceeds maximum_touches ({})",
                self.minimum_touches, self.maximum_touches
            )));
        }
        if !self.minimum_distance.is_finite() || self.minimum_distance < 0.0 {
            return Err(TactileError::config(format!(
                "minimum_distance must be a finite, non-negative value (got {})",
                self.minimum_distance
            )));
        }
        if !self.smoothing_step_ratio.is_finite() || self.smoothing_step_ratio < 0.0 {
            return Err(TactileError::config(format!(
                "smoothing_step_ratio must be a finite, non-negative value (got {})",
                self.smoothing_step_ratio
            )));
        }
        Ok(())
    }

    /// Squared pan distance; displacements are compared against this.
    pub fn minimum_distance_squared(&self) -> f32 {
        self.minimum_distance * self.minimum_distance
    }

    /// Number of emissions over which the skipped threshold is phased in.
    ///
    /// Zero disables smoothing.
    pub fn smoothing_steps(&self) -> u32 {
        (self.minimum_distance * self.smoothing_step_ratio) as u32
    }

    /// Whether `count` touch points are within the configured bounds.
    pub fn accepts_touch_count(&self, count: u32) -> bool {
        count >= self.minimum_touches && count <= self.maximum_touches
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pan recognizer thresholds.
    pub pan: PanConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "tactile_gesture_core=trace,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> TactileResult<Self> {
        if !path.exists() {
            return Err(TactileError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.pan.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> TactileResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> TactileResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("tactile").join("config.json")
}
