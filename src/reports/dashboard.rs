//! Dashboard report
//!
//! Bundles category usage, target and goal summaries, alerts and the
//! spending trend into one view for a single user.

use chrono::NaiveDate;
use serde::Serialize;

use super::alerts::{build_alerts, Alert};
use super::category_usage::CategoryUsage;
use super::goal_summary::GoalSummary;
use super::target_summary::TargetSummary;
use super::trend::SpendingTrend;
use crate::config::ProgressThresholds;
use crate::models::{Category, DateRange, SavingGoal, Target, Transaction};

/// Records a dashboard is generated from, all belonging to one user
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub categories: &'a [Category],
    pub transactions: &'a [Transaction],
    pub targets: &'a [Target],
    pub goals: &'a [SavingGoal],
    /// Window for category usage; the trend also compares it with its predecessor
    pub window: DateRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub category_usage: CategoryUsage,
    pub targets: TargetSummary,
    pub goals: GoalSummary,
    pub alerts: Vec<Alert>,
    pub trend: SpendingTrend,
}

impl DashboardReport {
    pub fn generate(input: DashboardInput<'_>, today: NaiveDate, thresholds: &ProgressThresholds) -> Self {
        let targets = TargetSummary::build(input.targets, input.transactions, today, thresholds);
        let goals = GoalSummary::build(input.goals, today, thresholds);
        let alerts = build_alerts(&targets.lines, &goals.lines, thresholds);
        let in_window: Vec<Transaction> = input
            .transactions
            .iter()
            .filter(|t| input.window.contains(t.date))
            .cloned()
            .collect();

        Self {
            today,
            category_usage: CategoryUsage::collect(input.categories, &in_window),
            trend: SpendingTrend::compare(input.transactions, input.window),
            targets,
            goals,
            alerts,
        }
    }

    /// Number of targets and goals left out because they failed evaluation
    pub fn skipped(&self) -> usize {
        self.targets.skipped + self.goals.skipped
    }

    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        let mut output = String::new();
        let range = |r: &DateRange| format!("{} to {}", r.start.format(date_format), r.end.format(date_format));

        output.push_str(&format!("Dashboard for {}\n", self.today.format(date_format)));
        output.push_str(&"=".repeat(86));
        output.push_str("\n\n");

        output.push_str(&format!(
            "Spending {} (previous {})\n",
            range(&self.trend.window),
            range(&self.trend.previous_window)
        ));
        output.push_str(&self.trend.format_terminal(currency));
        output.push('\n');

        output.push_str("Budget targets\n");
        if self.targets.lines.is_empty() {
            output.push_str("No targets.\n");
        } else {
            output.push_str(&self.targets.format_terminal(currency));
        }
        output.push('\n');

        output.push_str("Saving goals\n");
        if self.goals.lines.is_empty() {
            output.push_str("No goals.\n");
        } else {
            output.push_str(&self.goals.format_terminal(currency, date_format));
        }
        output.push('\n');

        output.push_str(&format!("Categories {}\n", range(&self.trend.window)));
        if let Some(top) = self.category_usage.most_used() {
            output.push_str(&format!(
                "Most used: {} ({} transactions)\n",
                top.name, top.transaction_count
            ));
        }
        output.push_str(&self.category_usage.format_terminal(currency, date_format));
        output.push('\n');

        output.push_str(&format!("Alerts ({})\n", self.alerts.len()));
        for alert in &self.alerts {
            output.push_str(&format!("  [{:<6}] {}\n", alert.severity, alert.message));
        }

        output
    }
}
