//! Target service
//!
//! Budget target management plus progress evaluation against the user's
//! stored transactions.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::config::ProgressThresholds;
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{CategoryId, Money, PeriodKind, Target, TargetId, Transaction, UserId};
use crate::progress::{budget_exceeded, evaluate_target, ProgressEvent, TargetProgress};
use crate::reports::TargetSummary;
use crate::storage::Storage;

/// Service for budget targets
pub struct TargetService<'a> {
    storage: &'a Storage,
    owner: UserId,
    thresholds: ProgressThresholds,
}

impl<'a> TargetService<'a> {
    pub fn new(storage: &'a Storage, owner: UserId) -> Self {
        Self {
            storage,
            owner,
            thresholds: ProgressThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: ProgressThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Create a target for the period of kind `period` containing `today`
    pub fn create(
        &self,
        name: &str,
        amount: Money,
        period: PeriodKind,
        category_id: Option<CategoryId>,
        today: NaiveDate,
    ) -> FinpulseResult<Target> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinpulseError::Validation("Target name cannot be empty".into()));
        }

        if let Some(id) = category_id {
            let category = self
                .storage
                .categories
                .get(self.owner, id)?
                .ok_or_else(|| FinpulseError::category_not_found(id.to_string()))?;
            if !category.kind.is_expense() {
                return Err(FinpulseError::Validation(format!(
                    "Targets track spending; '{}' is an income category",
                    category.name
                )));
            }
        }

        let target = Target::new(self.owner, name, amount, period, category_id, today);
        target.validate()?;

        self.storage.targets.upsert(target.clone())?;
        self.storage.targets.save()?;

        self.storage.log_create(
            EntityType::Target,
            target.id.to_string(),
            Some(target.name.clone()),
            &target,
        )?;
        info!(
            target_id = %target.id,
            name = %target.name,
            amount = %target.amount,
            period = target.period.as_str(),
            "Created target"
        );

        Ok(target)
    }

    pub fn get(&self, id: TargetId) -> FinpulseResult<Option<Target>> {
        self.storage.targets.get(self.owner, id)
    }

    /// Find a target by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FinpulseResult<Option<Target>> {
        let targets = self.list()?;
        let wanted = identifier.trim().to_lowercase();

        if let Some(target) = targets.iter().find(|t| t.name.to_lowercase() == wanted) {
            return Ok(Some(target.clone()));
        }
        Ok(targets.into_iter().find(|t| t.id.matches_str(identifier)))
    }

    pub fn resolve(&self, identifier: &str) -> FinpulseResult<Target> {
        self.find(identifier)?
            .ok_or_else(|| FinpulseError::target_not_found(identifier))
    }

    pub fn list(&self) -> FinpulseResult<Vec<Target>> {
        self.storage.targets.list(self.owner)
    }

    pub fn update_amount(&self, id: TargetId, amount: Money) -> FinpulseResult<Target> {
        self.modify(id, |target| {
            target.set_amount(amount);
            target.validate()
        })
    }

    pub fn rename(&self, id: TargetId, name: &str) -> FinpulseResult<Target> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinpulseError::Validation("Target name cannot be empty".into()));
        }
        self.modify(id, |target| {
            target.rename(name);
            Ok(())
        })
    }

    /// Flip between active and completed
    pub fn toggle_active(&self, id: TargetId) -> FinpulseResult<Target> {
        self.modify(id, |target| {
            target.toggle_active();
            Ok(())
        })
    }

    /// Move an elapsed target to the period containing `today`
    ///
    /// A target whose period has not ended yet is returned unchanged.
    pub fn roll_period(&self, id: TargetId, today: NaiveDate) -> FinpulseResult<Target> {
        let target = self.require(id)?;
        if target.period_end >= today {
            return Ok(target);
        }
        self.modify(id, |target| {
            target.roll_to(today);
            Ok(())
        })
    }

    pub fn delete(&self, id: TargetId) -> FinpulseResult<Target> {
        let target = self
            .storage
            .targets
            .delete(self.owner, id)?
            .ok_or_else(|| FinpulseError::target_not_found(id.to_string()))?;
        self.storage.targets.save()?;

        self.storage.log_delete(
            EntityType::Target,
            target.id.to_string(),
            Some(target.name.clone()),
            &target,
        )?;
        info!(target_id = %target.id, name = %target.name, "Deleted target");

        Ok(target)
    }

    pub fn progress(&self, id: TargetId, today: NaiveDate) -> FinpulseResult<TargetProgress> {
        let target = self.require(id)?;
        let transactions = self
            .storage
            .transactions
            .get_by_date_range(self.owner, target.period_start, target.period_end)?;
        evaluate_target(&target, &transactions, today, &self.thresholds)
    }

    /// Every target with its progress; malformed targets are skipped
    pub fn list_progress(&self, today: NaiveDate) -> FinpulseResult<TargetSummary> {
        let targets = self.list()?;
        let transactions = self.storage.transactions.list(self.owner)?;
        Ok(TargetSummary::build(&targets, &transactions, today, &self.thresholds))
    }

    /// Budget-exceeded events caused by `added`, which must already be stored
    pub fn newly_exceeded(&self, added: &Transaction, today: NaiveDate) -> FinpulseResult<Vec<ProgressEvent>> {
        let after: Vec<Transaction> = self.storage.transactions.list(self.owner)?;
        let before: Vec<Transaction> = after.iter().filter(|t| t.id != added.id).cloned().collect();

        let mut events = Vec::new();
        for target in self.list()?.iter().filter(|t| t.active && t.matches(added)) {
            let evaluated = evaluate_target(target, &before, today, &self.thresholds)
                .and_then(|b| Ok((b, evaluate_target(target, &after, today, &self.thresholds)?)));
            match evaluated {
                Ok((b, a)) => events.extend(budget_exceeded(target, &b, &a)),
                Err(e) => warn!(target_id = %target.id, error = %e, "Skipping target"),
            }
        }

        Ok(events)
    }

    fn require(&self, id: TargetId) -> FinpulseResult<Target> {
        self.get(id)?
            .ok_or_else(|| FinpulseError::target_not_found(id.to_string()))
    }

    fn modify<F>(&self, id: TargetId, change: F) -> FinpulseResult<Target>
    where
        F: FnOnce(&mut Target) -> FinpulseResult<()>,
    {
        let mut target = self.require(id)?;
        let before = target.clone();
        change(&mut target)?;

        self.storage.targets.upsert(target.clone())?;
        self.storage.targets.save()?;

        self.storage.log_update(
            EntityType::Target,
            target.id.to_string(),
            Some(target.name.clone()),
            &before,
            &target,
        )?;
        info!(target_id = %target.id, name = %target.name, "Updated target");

        Ok(target)
    }
}
