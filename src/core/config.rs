//! Workflow configuration with documented defaults
//!
//! The host owns preference storage. The assistant only ever sees an
//! immutable `Config` value handed to each dispatch, never a global.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Defaults read by the workflow executors
///
/// Loaded from TOML with every field optional; missing fields fall back to
/// the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === SMART ARRAY ===
    /// Number of copies in the array entry (1..=1000)
    pub array_count: u32,

    /// Relative X offset between copies (-100.0..=100.0)
    pub array_offset_x: f32,

    // === HARD SURFACE ===
    /// Bevel segments (1..=100)
    pub bevel_segments: u32,

    /// Subdivision levels (0..=6)
    ///
    /// Levels above 6 are rejected: each level quadruples face count.
    pub subdivision_levels: u32,

    // === SOLIDIFY ===
    /// Shell thickness in meters (0.0001..=10.0)
    pub solidify_thickness: f32,

    // === UI / DIAGNOSTICS ===
    /// Show recognized commands in front-ends
    pub show_command_help: bool,

    /// Show selection info in front-ends
    pub show_selection_info: bool,

    /// Log per-stage dispatch timings at info level
    pub log_timings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            array_count: 5,
            array_offset_x: 1.0,
            bevel_segments: 3,
            subdivision_levels: 2,
            solidify_thickness: 0.01,
            show_command_help: true,
            show_selection_info: true,
            log_timings: false,
        }
    }
}

/// Error type for configuration loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl Config {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("array_count", f64::from(self.array_count), 1.0, 1000.0)?;
        check_range("array_offset_x", f64::from(self.array_offset_x), -100.0, 100.0)?;
        check_range("bevel_segments", f64::from(self.bevel_segments), 1.0, 100.0)?;
        check_range("subdivision_levels", f64::from(self.subdivision_levels), 0.0, 6.0)?;
        check_range(
            "solidify_thickness",
            f64::from(self.solidify_thickness),
            0.0001,
            10.0,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons and is rejected
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
