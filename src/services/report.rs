//! Report service
//!
//! Loads a user's records from storage and hands them to the pure report
//! builders.

use chrono::NaiveDate;
use tracing::warn;

use crate::config::ProgressThresholds;
use crate::error::FinpulseResult;
use crate::models::{DateRange, UserId};
use crate::reports::{build_alerts, Alert, DashboardInput, DashboardReport, GoalSummary, TargetSummary};
use crate::storage::Storage;

pub struct ReportService<'a> {
    storage: &'a Storage,
    owner: UserId,
    thresholds: ProgressThresholds,
}

impl<'a> ReportService<'a> {
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

    /// Full dashboard; the trend compares `window` with the window before it
    pub fn dashboard(&self, window: DateRange, today: NaiveDate) -> FinpulseResult<DashboardReport> {
        let categories = self.storage.categories.list(self.owner)?;
        let transactions = self.storage.transactions.list(self.owner)?;
        let targets = self.storage.targets.list(self.owner)?;
        let goals = self.storage.goals.list(self.owner)?;

        let report = DashboardReport::generate(
            DashboardInput {
                categories: &categories,
                transactions: &transactions,
                targets: &targets,
                goals: &goals,
                window,
            },
            today,
            &self.thresholds,
        );

        if report.skipped() > 0 {
            warn!(skipped = report.skipped(), "Dashboard left out records that failed evaluation");
        }

        Ok(report)
    }

    /// Current alerts only
    pub fn alerts(&self, today: NaiveDate) -> FinpulseResult<Vec<Alert>> {
        let transactions = self.storage.transactions.list(self.owner)?;
        let targets = TargetSummary::build(
            &self.storage.targets.list(self.owner)?,
            &transactions,
            today,
            &self.thresholds,
        );
        let goals = GoalSummary::build(&self.storage.goals.list(self.owner)?, today, &self.thresholds);

        Ok(build_alerts(&targets.lines, &goals.lines, &self.thresholds))
    }
}
