//! finpulse - budget targets and saving goals from the terminal
//!
//! This library holds the progress engine behind the `finpulse` binary. It
//! records income and expense transactions, evaluates spending targets and
//! saving goals against them, and derives summaries, alerts and trends.
//!
//! # Architecture
//!
//! - `models`: persisted records and value types (money, periods, ids)
//! - `progress`: pure evaluation of targets and goals, milestones, fund moves
//! - `reports`: summaries, category usage, alerts and the dashboard
//! - `storage`: JSON file repositories
//! - `services`: owner-scoped business operations with audit logging
//! - `audit`: append-only change log
//! - `config`: paths and settings
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use finpulse::config::{FinpulsePaths, Settings};
//! use finpulse::services::GoalService;
//! use finpulse::storage::Storage;
//!
//! let paths = FinpulsePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let goals = GoalService::new(&storage, settings.user_id).list_progress(today)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod progress;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinpulseError, FinpulseResult};
