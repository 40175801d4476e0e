//! User settings for finpulse
//!
//! Holds the local profile identity, display preferences and the thresholds
//! that drive status classification and alerts.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::FinpulsePaths;
use crate::error::FinpulseError;
use crate::models::UserId;

/// Thresholds used by the evaluators and the alert builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressThresholds {
    /// A target at or above this percentage (and below 100) is in warning
    #[serde(default = "default_warning_percentage")]
    pub warning_percentage: f64,

    /// Unachieved goals due within this many days raise an alert
    #[serde(default = "default_goal_deadline_window_days")]
    pub goal_deadline_window_days: i64,

    /// Pace fallback: goals with fewer days left than this are behind when
    /// there is no elapsed-time baseline
    #[serde(default = "default_behind_fallback_days")]
    pub behind_fallback_days: i64,
}

fn default_warning_percentage() -> f64 {
    85.0
}

fn default_goal_deadline_window_days() -> i64 {
    7
}

fn default_behind_fallback_days() -> i64 {
    30
}

impl Default for ProgressThresholds {
    fn default() -> Self {
        Self {
            warning_percentage: default_warning_percentage(),
            goal_deadline_window_days: default_goal_deadline_window_days(),
            behind_fallback_days: default_behind_fallback_days(),
        }
    }
}

impl ProgressThresholds {
    pub fn validate(&self) -> Result<(), FinpulseError> {
        if !(self.warning_percentage > 0.0 && self.warning_percentage < 100.0) {
            return Err(FinpulseError::Config(format!(
                "warning_percentage must be between 0 and 100, got {}",
                self.warning_percentage
            )));
        }

        if self.goal_deadline_window_days < 0 || self.behind_fallback_days < 0 {
            return Err(FinpulseError::Config(
                "Threshold windows cannot be negative".into(),
            ));
        }

        Ok(())
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The profile the CLI reads and writes records as
    #[serde(default)]
    pub user_id: UserId,

    /// Currency symbol used for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for terminal output (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub thresholds: ProgressThresholds,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Reject strftime patterns chrono cannot render
pub fn validate_date_format(format: &str) -> Result<(), FinpulseError> {
    if format.trim().is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FinpulseError::Config(format!(
            "Invalid date_format '{}': expected a strftime pattern such as %Y-%m-%d",
            format
        )));
    }
    Ok(())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            thresholds: ProgressThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fresh defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &FinpulsePaths) -> Result<Self, FinpulseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinpulseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinpulseError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.thresholds.validate()?;
        validate_date_format(&settings.date_format)?;
        Ok(settings)
    }

    pub fn save(&self, paths: &FinpulsePaths) -> Result<(), FinpulseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinpulseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinpulseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
