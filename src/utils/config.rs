//! Puzzle configuration, read from a TOML file.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::constants::cube_constants::{
    COMPENSATION_STEPS, DEFAULT_ORDER, DEFAULT_SIZE, FREE_ROTATE_GAIN, MAX_ORDER, MIN_ORDER,
    SLICE_DRAG_GAIN, UNDO_STEPS,
};
use crate::utils::constants::game_constants::SEED;
use crate::utils::constants::gesture_constants::{
    DEFAULT_SHUFFLE_STEPS, LARGE_ORDER_MOVE_RATE_HZ, LARGE_ORDER_THRESHOLD, MOVE_RATE_HZ,
};

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("order {order} is outside {min}..={max}")]
    OrderOutOfRange { order: u32, min: u32, max: u32 },
    #[error("cell size must be positive, got {0}")]
    InvalidSize(f32),
    #[error("`{0}` must be at least 1")]
    ZeroSteps(&'static str),
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
}

/// Tunable puzzle settings. Missing keys take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub order: u32,
    pub size: f32,
    pub min_order: u32,
    pub max_order: u32,
    pub shuffle_steps: u32,
    pub compensation_steps: u32,
    pub undo_steps: u32,
    pub slice_drag_gain: f32,
    pub free_rotate_gain: f32,
    pub move_rate_hz: f32,
    pub large_order_move_rate_hz: f32,
    pub large_order_threshold: u32,
    pub seed: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            size: DEFAULT_SIZE,
            min_order: MIN_ORDER,
            max_order: MAX_ORDER,
            shuffle_steps: DEFAULT_SHUFFLE_STEPS,
            compensation_steps: COMPENSATION_STEPS,
            undo_steps: UNDO_STEPS,
            slice_drag_gain: SLICE_DRAG_GAIN,
            free_rotate_gain: FREE_ROTATE_GAIN,
            move_rate_hz: MOVE_RATE_HZ,
            large_order_move_rate_hz: LARGE_ORDER_MOVE_RATE_HZ,
            large_order_threshold: LARGE_ORDER_THRESHOLD,
            seed: SEED,
        }
    }
}

impl PuzzleConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        self.check_order(self.order)?;
        if !(self.size > 0.0) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        for (name, steps) in [
            ("compensation_steps", self.compensation_steps),
            ("undo_steps", self.undo_steps),
        ] {
            if steps == 0 {
                return Err(ConfigError::ZeroSteps(name));
            }
        }
        for (name, value) in [
            ("slice_drag_gain", self.slice_drag_gain),
            ("free_rotate_gain", self.free_rotate_gain),
            ("move_rate_hz", self.move_rate_hz),
            ("large_order_move_rate_hz", self.large_order_move_rate_hz),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        Ok(self)
    }

    /// Checks that `order` lies in the configured range.
    pub fn check_order(&self, order: u32) -> Result<(), ConfigError> {
        if order < self.min_order.max(MIN_ORDER) || order > self.max_order {
            return Err(ConfigError::OrderOutOfRange {
                order,
                min: self.min_order.max(MIN_ORDER),
                max: self.max_order,
            });
        }
        Ok(())
    }

    /// Maximum drag-move rate for a puzzle of `order`.
    pub fn move_rate_hz(&self, order: u32) -> f32 {
        if order >= self.large_order_threshold {
            self.large_order_move_rate_hz
        } else {
            self.move_rate_hz
        }
    }

    /// Minimum time between two handled drag-move events.
    pub fn move_interval(&self, order: u32) -> Duration {
        Duration::from_secs_f32(1.0 / self.move_rate_hz(order))
    }
}
