//! Host run settings
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_MS;
use crate::sim::{DEFAULT_QUEUE_CAPACITY, Viewport};
use crate::tuning::Tuning;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse settings")]
    Json(#[source] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Settings for a single run of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Host ===
    /// Drawable area size
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Milliseconds between ticks when pacing in real time
    pub tick_ms: u64,
    /// Sleep `tick_ms` between ticks (off = run as fast as possible)
    pub realtime: bool,
    /// Stop a headless run after this many ticks
    pub max_ticks: u64,

    // === Simulation ===
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Capacity of the input event queue
    pub event_queue_capacity: usize,
    /// Let the demo player defend
    pub autopilot: bool,

    /// Gameplay constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 960.0,
            viewport_height: 720.0,
            tick_ms: TICK_MS,
            realtime: false,
            max_ticks: 20_000,

            seed: None,
            event_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            autopilot: true,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|err| match err {
            SettingsError::Json(source) => SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let w = self.viewport_width;
        let h = self.viewport_height;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(SettingsError::InvalidViewport {
                width: w,
                height: h,
            });
        }
        self.tuning.validate()
    }

    /// Viewport described by these settings
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Event queue capacity, never zero
    pub fn queue_capacity(&self) -> usize {
        self.event_queue_capacity.max(1)
    }
}
