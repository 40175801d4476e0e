//! Configuration module for finpulse
//!
//! - Data directory resolution
//! - User settings persistence
//! - Status and alert thresholds

pub mod paths;
pub mod settings;

pub use paths::FinpulsePaths;
pub use settings::{ProgressThresholds, Settings};
