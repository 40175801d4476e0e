//! Budget target summary

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::warn;

use super::category_usage::truncate;
use crate::config::ProgressThresholds;
use crate::models::{Money, Target, Transaction};
use crate::progress::{evaluate_target, TargetProgress, TargetStatus};

/// A target together with its evaluated progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetLine {
    pub target: Target,
    pub progress: TargetProgress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TargetStatusCounts {
    pub on_track: usize,
    pub warning: usize,
    pub exceeded: usize,
    pub completed: usize,
}

impl TargetStatusCounts {
    fn record(&mut self, status: TargetStatus) {
        match status {
            TargetStatus::OnTrack => self.on_track += 1,
            TargetStatus::Warning => self.warning += 1,
            TargetStatus::Exceeded => self.exceeded += 1,
            TargetStatus::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.on_track + self.warning + self.exceeded + self.completed
    }
}

/// Aggregate view over a user's budget targets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetSummary {
    /// Every target that evaluated, in input order
    pub lines: Vec<TargetLine>,
    pub counts: TargetStatusCounts,
    /// Sum of active target ceilings
    pub total_budget: Money,
    /// Spending counted against active targets
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Mean percentage over active targets, 0 when there are none
    pub average_percentage: f64,
    /// Highest percentage among targets that are not completed
    pub closest_to_limit: Option<TargetLine>,
    /// Targets left out because they could not be evaluated
    pub skipped: usize,
}

impl TargetSummary {
    /// Evaluate every target and aggregate the results
    ///
    /// A target that fails evaluation is logged, counted in `skipped`, and
    /// otherwise ignored.
    pub fn build(
        targets: &[Target],
        transactions: &[Transaction],
        today: NaiveDate,
        thresholds: &ProgressThresholds,
    ) -> Self {
        let mut summary = Self::default();

        for target in targets {
            match evaluate_target(target, transactions, today, thresholds) {
                Ok(progress) => summary.lines.push(TargetLine {
                    target: target.clone(),
                    progress,
                }),
                Err(e) => {
                    warn!(target_id = %target.id, error = %e, "Skipping target in summary");
                    summary.skipped += 1;
                }
            }
        }

        let mut active_percentage_sum = 0.0;
        let mut active_count = 0usize;

        for line in &summary.lines {
            summary.counts.record(line.progress.status);

            if line.target.active {
                summary.total_budget += line.target.amount;
                summary.total_spent += line.progress.current_spending;
                active_percentage_sum += line.progress.percentage;
                active_count += 1;
            }
        }

        summary.total_remaining = summary.total_budget - summary.total_spent;
        if active_count > 0 {
            summary.average_percentage = active_percentage_sum / active_count as f64;
        }

        summary.closest_to_limit = summary
            .lines
            .iter()
            .filter(|l| l.progress.status != TargetStatus::Completed)
            .min_by(|a, b| closer_to_limit(a, b))
            .cloned();

        summary
    }

    /// Lines in a given status, in input order
    pub fn with_status(&self, status: TargetStatus) -> impl Iterator<Item = &TargetLine> {
        self.lines.iter().filter(move |l| l.progress.status == status)
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<24} {:<8} {:>12} {:>12} {:>8} {:>6}  {}\n",
            "Target", "Period", "Spent", "Limit", "Used", "Days", "Status"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for line in &self.lines {
            output.push_str(&format!(
                "{:<24} {:<8} {:>12} {:>12} {:>7.1}% {:>6}  {}\n",
                truncate(&line.target.name, 24),
                line.target.period.as_str(),
                line.progress.current_spending.format_with_symbol(currency),
                line.target.amount.format_with_symbol(currency),
                line.progress.percentage,
                line.progress.days_remaining,
                line.progress.status,
            ));
        }

        output.push_str(&"-".repeat(86));
        output.push('\n');
        output.push_str(&format!(
            "Budget {}  Spent {}  Remaining {}  Average {:.1}%\n",
            self.total_budget.format_with_symbol(currency),
            self.total_spent.format_with_symbol(currency),
            self.total_remaining.format_with_symbol(currency),
            self.average_percentage
        ));

        if let Some(line) = &self.closest_to_limit {
            output.push_str(&format!(
                "Closest to limit: {} ({:.1}%)\n",
                line.target.name, line.progress.percentage
            ));
        }

        if self.skipped > 0 {
            output.push_str(&format!("{} target(s) could not be evaluated\n", self.skipped));
        }

        output
    }
}

/// Ordering that puts the line closest to its limit first
fn closer_to_limit(a: &TargetLine, b: &TargetLine) -> Ordering {
    b.progress
        .percentage
        .total_cmp(&a.progress.percentage)
        .then(a.target.period_end.cmp(&b.target.period_end))
        .then_with(|| a.target.name.cmp(&b.target.name))
}
