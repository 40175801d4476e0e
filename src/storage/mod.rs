//! Storage layer for finpulse
//!
//! JSON file storage with atomic writes, one repository per record type, and
//! the append-only audit log that records every mutation.

pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod targets;
pub mod transactions;

pub use categories::CategoryRepository;
pub use goals::GoalRepository;
pub use targets::TargetRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::FinpulsePaths;
use crate::error::FinpulseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinpulsePaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub targets: TargetRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a storage instance rooted at `paths`, creating directories as needed
    pub fn new(paths: FinpulsePaths) -> Result<Self, FinpulseError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            targets: TargetRepository::new(paths.targets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            paths,
        })
    }

    /// Create and immediately load from disk
    pub fn open(paths: FinpulsePaths) -> Result<Self, FinpulseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinpulsePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), FinpulseError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.targets.load()?;
        self.goals.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), FinpulseError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.targets.save()?;
        self.goals.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinpulseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Log an update; the diff summary is computed from the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FinpulseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            snapshot_diff(before, after),
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FinpulseError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

/// Field-level summary of what changed between two snapshots
pub fn snapshot_diff<T: Serialize>(before: &T, after: &T) -> Option<String> {
    match (serde_json::to_value(before), serde_json::to_value(after)) {
        (Ok(b), Ok(a)) => generate_diff(&b, &a),
        _ => None,
    }
}
