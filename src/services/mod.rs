//! Service layer for finpulse
//!
//! Storage-backed operations scoped to one user. Every mutation is validated,
//! persisted, written to the audit log, and logged.

pub mod category;
pub mod goal;
pub mod report;
pub mod target;
pub mod transaction;

pub use category::CategoryService;
pub use goal::{GoalService, NewGoal};
pub use report::ReportService;
pub use target::TargetService;
pub use transaction::{NewTransaction, TransactionFilter, TransactionPatch, TransactionService, TransactionSort};
