//! Path management for finpulse
//!
//! ## Path Resolution Order
//!
//! 1. `FINPULSE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/finpulse` on Linux,
//!    `~/Library/Application Support/finpulse` on macOS, `%APPDATA%\finpulse`
//!    on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FinpulseError;

pub const DATA_DIR_ENV: &str = "FINPULSE_DATA_DIR";

/// All on-disk locations used by finpulse
#[derive(Debug, Clone)]
pub struct FinpulsePaths {
    base_dir: PathBuf,
}

impl FinpulsePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, FinpulseError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn targets_file(&self) -> PathBuf {
        self.data_dir().join("targets.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), FinpulseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinpulseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinpulseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `finpulse init` has run (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FinpulseError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| FinpulseError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("finpulse"))
}
