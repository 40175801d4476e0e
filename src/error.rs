//! Error types for finpulse
//!
//! The first four variants are the evaluation taxonomy returned by the
//! progress engine. The rest cover configuration, storage and validation at
//! the service boundary.

use thiserror::Error;

use crate::models::Money;

/// The main error type for finpulse operations
#[derive(Error, Debug)]
pub enum FinpulseError {
    /// A budget target cannot be evaluated (non-positive amount or empty period)
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// A deposit or withdrawal amount is not strictly positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A withdrawal exceeds what the goal holds
    #[error("Insufficient funds in goal '{goal}': requested {requested}, available {available}")]
    InsufficientFunds {
        goal: String,
        requested: Money,
        available: Money,
    },

    /// A saving goal cannot be evaluated (non-positive target amount)
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinpulseError {
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    pub fn target_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Target",
            identifier: identifier.into(),
        }
    }

    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came out of target/goal evaluation or a fund operation
    pub fn is_evaluation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget(_)
                | Self::InvalidAmount(_)
                | Self::InsufficientFunds { .. }
                | Self::InvalidGoal(_)
        )
    }
}

impl From<std::io::Error> for FinpulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinpulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finpulse operations
pub type FinpulseResult<T> = Result<T, FinpulseError>;
