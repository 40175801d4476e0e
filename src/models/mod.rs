//! Core data models for finpulse
//!
//! Persisted records (transactions, categories, targets, saving goals) and
//! the value types they are built from.

pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod target;
pub mod transaction;

pub use category::{Category, CategoryValidationError};
pub use goal::SavingGoal;
pub use ids::{CategoryId, GoalId, TargetId, TransactionId, UserId};
pub use money::{Money, MoneyParseError};
pub use period::{parse_date, DateRange, PeriodKind};
pub use target::Target;
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
