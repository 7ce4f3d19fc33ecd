//! Runtime-tunable recognition parameters
//!
//! Held outside the tracking session so values survive stop/start. The
//! frame loop reads a copy once per frame; the last write before a frame
//! wins.

use serde::{Deserialize, Serialize};

use crate::error::{TrackingError, TrackingResult};
use crate::physics::MAX_SMOOTHING;

pub const MIN_SENSITIVITY: f32 = 0.1;
pub const MAX_SENSITIVITY: f32 = 1.0;
pub const MIN_SMOOTHING: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Confidence floor below which a gesture becomes "Uncertain"
    pub sensitivity: f32,
    /// Weight of the previous frame in landmark smoothing
    pub smoothing: f32,
    /// Upper bound on one detector call before the frame is skipped
    pub detector_timeout_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.7,
            smoothing: 0.8,
            detector_timeout_ms: 1000,
        }
    }
}

impl GestureConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep defaults
    pub fn from_json(json: &str) -> TrackingResult<Self> {
        let parsed: GestureConfig = serde_json::from_str(json)
            .map_err(|e| TrackingError::InvalidConfig(e.to_string()))?;

        let mut config = GestureConfig::default();
        config.set_sensitivity(parsed.sensitivity)?;
        config.set_smoothing(parsed.smoothing)?;
        config.set_detector_timeout(parsed.detector_timeout_ms)?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Set sensitivity, clamped to [0.1, 1.0]
    pub fn set_sensitivity(&mut self, value: f32) -> TrackingResult<()> {
        self.sensitivity = finite("sensitivity", value)?.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
        Ok(())
    }

    /// Set smoothing, clamped to [0, 0.95]
    pub fn set_smoothing(&mut self, value: f32) -> TrackingResult<()> {
        self.smoothing = finite("smoothing", value)?.clamp(MIN_SMOOTHING, MAX_SMOOTHING);
        Ok(())
    }

    pub fn set_detector_timeout(&mut self, timeout_ms: u32) -> TrackingResult<()> {
        if timeout_ms == 0 {
            return Err(TrackingError::InvalidConfig("detector timeout must be positive".into()));
        }
        self.detector_timeout_ms = timeout_ms;
        Ok(())
    }
}

fn finite(name: &str, value: f32) -> TrackingResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackingError::InvalidConfig(format!("{} must be a finite number", name)))
    }
}
