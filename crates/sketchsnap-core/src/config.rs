//! Engine configuration.
//!
//! Every tunable constant of the recognizer, hit tester, selection
//! affordance and drag handling lives here. Defaults reproduce the stock
//! behavior; a host may override any subset from a JSON file.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Shape recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Aspect-ratio tolerance for oval vs rectangle (unconstrained strokes).
    pub oval_tolerance: f64,
    /// Aspect-ratio tolerance for square vs circle (constrained strokes).
    pub square_tolerance: f64,
    /// RDP tolerance applied to strokes kept as freehand (0 = keep every point).
    pub simplify_tolerance: f64,
}

impl RecognitionConfig {
    pub const DEFAULT_OVAL_TOLERANCE: f64 = 0.25;
    pub const DEFAULT_SQUARE_TOLERANCE: f64 = 0.15;
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            oval_tolerance: Self::DEFAULT_OVAL_TOLERANCE,
            square_tolerance: Self::DEFAULT_SQUARE_TOLERANCE,
            simplify_tolerance: 0.0,
        }
    }
}

/// Hit testing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// Lower clamp for the center-distance threshold.
    pub min_threshold: f64,
    /// Upper clamp for the center-distance threshold.
    pub max_threshold: f64,
    /// Distance from a freehand stroke's path that still counts as on it.
    pub freehand_tolerance: f64,
}

impl HitTestConfig {
    pub const DEFAULT_MIN_THRESHOLD: f64 = 30.0;
    pub const DEFAULT_MAX_THRESHOLD: f64 = 50.0;
    pub const DEFAULT_FREEHAND_TOLERANCE: f64 = 5.0;
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            min_threshold: Self::DEFAULT_MIN_THRESHOLD,
            max_threshold: Self::DEFAULT_MAX_THRESHOLD,
            freehand_tolerance: Self::DEFAULT_FREEHAND_TOLERANCE,
        }
    }
}

/// Selection affordance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Offset of the toggle/delete buttons from the shape center.
    pub button_offset: Vec2,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            button_offset: Vec2::new(20.0, -10.0),
        }
    }
}

/// Drag settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Also move circles and squares on drag (only rectangles and ovals move otherwise).
    pub move_all_shapes: bool,
    /// Pointer travel before a press on a shape becomes a drag.
    pub click_threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            move_all_shapes: false,
            click_threshold: 4.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub recognition: RecognitionConfig,
    pub hit_test: HitTestConfig,
    pub selection: SelectionConfig,
    pub drag: DragConfig,
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        let r = &self.recognition;
        for (name, value) in [
            ("recognition.oval_tolerance", r.oval_tolerance),
            ("recognition.square_tolerance", r.square_tolerance),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1), got {}",
                    name, value
                )));
            }
        }

        let h = &self.hit_test;
        for (name, value) in [
            ("recognition.simplify_tolerance", r.simplify_tolerance),
            ("hit_test.min_threshold", h.min_threshold),
            ("hit_test.max_threshold", h.max_threshold),
            ("hit_test.freehand_tolerance", h.freehand_tolerance),
            ("drag.click_threshold", self.drag.click_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if h.min_threshold > h.max_threshold {
            return Err(ConfigError::Invalid(format!(
                "hit_test.min_threshold ({}) exceeds hit_test.max_threshold ({})",
                h.min_threshold, h.max_threshold
            )));
        }

        if !self.selection.button_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "selection.button_offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
