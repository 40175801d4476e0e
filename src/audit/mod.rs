//! Audit trail for finpulse
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON line, with before/after snapshots and a short
//! change summary for updates.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
