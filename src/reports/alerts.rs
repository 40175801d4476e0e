//! Alerts for targets and goals that need attention

use serde::Serialize;
use std::fmt;

use super::goal_summary::GoalLine;
use super::target_summary::TargetLine;
use crate::config::ProgressThresholds;
use crate::models::{GoalId, TargetId};
use crate::progress::{GoalStatus, TargetStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.pad("HIGH"),
            Self::Medium => f.pad("MEDIUM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BudgetWarning,
    BudgetExceeded,
    GoalOverdue,
    GoalDeadlineApproaching,
}

/// What an alert is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertSubject {
    Target { id: TargetId, name: String },
    Goal { id: GoalId, name: String },
}

impl AlertSubject {
    pub fn name(&self) -> &str {
        match self {
            Self::Target { name, .. } | Self::Goal { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub kind: AlertKind,
    pub subject: AlertSubject,
    pub message: String,
}

/// Build alerts from evaluated targets and goals
///
/// High severity alerts come first. Within a severity, target alerts keep
/// their input order and precede goal alerts.
pub fn build_alerts(
    targets: &[TargetLine],
    goals: &[GoalLine],
    thresholds: &ProgressThresholds,
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = targets
        .iter()
        .filter_map(target_alert)
        .chain(goals.iter().filter_map(|g| goal_alert(g, thresholds)))
        .collect();

    // Stable sort keeps input order within a severity
    alerts.sort_by_key(|a| a.severity);
    alerts
}

fn target_alert(line: &TargetLine) -> Option<Alert> {
    let subject = AlertSubject::Target {
        id: line.target.id,
        name: line.target.name.clone(),
    };
    let pct = line.progress.percentage;

    let (severity, kind, message) = match line.progress.status {
        TargetStatus::Exceeded => (
            AlertSeverity::High,
            AlertKind::BudgetExceeded,
            format!("Budget '{}' exceeded ({:.1}% used)", line.target.name, pct),
        ),
        TargetStatus::Warning => (
            AlertSeverity::Medium,
            AlertKind::BudgetWarning,
            format!("Budget '{}' is at {:.1}% of its limit", line.target.name, pct),
        ),
        TargetStatus::OnTrack | TargetStatus::Completed => return None,
    };

    Some(Alert {
        severity,
        kind,
        subject,
        message,
    })
}

fn goal_alert(line: &GoalLine, thresholds: &ProgressThresholds) -> Option<Alert> {
    let days = line.progress.days_remaining?;
    let name = &line.goal.name;

    let (severity, kind, message) = match line.progress.status {
        GoalStatus::Achieved => return None,
        GoalStatus::Overdue => (
            AlertSeverity::High,
            AlertKind::GoalOverdue,
            format!("Goal '{}' is overdue by {}", name, plural_days(-days)),
        ),
        GoalStatus::OnTrack | GoalStatus::Behind
            if (0..=thresholds.goal_deadline_window_days).contains(&days) =>
        {
            let due = if days == 0 {
                "today".to_string()
            } else {
                format!("in {}", plural_days(days))
            };
            (
                AlertSeverity::Medium,
                AlertKind::GoalDeadlineApproaching,
                format!(
                    "Goal '{}' is due {} ({:.1}% saved)",
                    name, due, line.progress.percentage
                ),
            )
        }
        GoalStatus::OnTrack | GoalStatus::Behind => return None,
    };

    Some(Alert {
        severity,
        kind,
        subject: AlertSubject::Goal {
            id: line.goal.id,
            name: name.clone(),
        },
        message,
    })
}

fn plural_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, SavingGoal, Target, Transaction, TransactionKind, UserId};
    use crate::reports::{GoalSummary, TargetSummary};
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    fn target_at(owner: UserId, name: &str, spent: i64) -> (Target, Transaction) {
        let category = CategoryId::new();
        let target = Target::monthly(owner, name, Money::from_units(100), today()).for_category(category);
        let txn = Transaction::new(
            owner,
            TransactionKind::Expense,
            category,
            Money::from_units(spent),
            today(),
        );
        (target, txn)
    }

    fn target_alerts(specs: &[(&str, i64)]) -> (TargetSummary, Vec<Alert>) {
        let owner = UserId::new();
        let (targets, txns): (Vec<_>, Vec<_>) = specs
            .iter()
            .map(|(name, spent)| target_at(owner, name, *spent))
            .unzip();
        let thresholds = ProgressThresholds::default();
        let summary = TargetSummary::build(&targets, &txns, today(), &thresholds);
        let alerts = build_alerts(&summary.lines, &[], &thresholds);
        (summary, alerts)
    }

    fn goal_due_in(name: &str, days: i64) -> SavingGoal {
        let mut goal = SavingGoal::new(UserId::new(), name, Money::from_units(1000))
            .with_current_amount(Money::from_units(900));
        goal.target_date = Some(today() + Duration::days(days));
        goal
    }

    fn goal_alerts(goals: &[SavingGoal]) -> Vec<Alert> {
        let thresholds = ProgressThresholds::default();
        let summary = GoalSummary::build(goals, today(), &thresholds);
        build_alerts(&[], &summary.lines, &thresholds)
    }

    #[test]
    fn test_single_warning_alert_for_40_and_92_percent() {
        let (summary, alerts) = target_alerts(&[("Food", 40), ("Fuel", 92)]);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[0].kind, AlertKind::BudgetWarning);
        assert_eq!(alerts[0].subject.name(), "Fuel");
        assert_eq!(summary.closest_to_limit.unwrap().target.name, "Fuel");
    }

    #[test]
    fn test_high_alerts_first_then_input_order() {
        let (_, alerts) = target_alerts(&[("A", 90), ("B", 130), ("C", 86), ("D", 100)]);

        let order: Vec<_> = alerts.iter().map(|a| (a.subject.name(), a.severity)).collect();
        assert_eq!(
            order,
            vec![
                ("B", AlertSeverity::High),
                ("D", AlertSeverity::High),
                ("A", AlertSeverity::Medium),
                ("C", AlertSeverity::Medium),
            ]
        );
        assert_eq!(alerts[0].message, "Budget 'B' exceeded (130.0% used)");
    }

    #[test]
    fn test_goal_deadline_window() {
        let alerts = goal_alerts(&[
            goal_due_in("Today", 0),
            goal_due_in("Week", 7),
            goal_due_in("Later", 8),
        ]);

        let names: Vec<_> = alerts.iter().map(|a| a.subject.name()).collect();
        assert_eq!(names, vec!["Today", "Week"]);
        assert!(alerts.iter().all(|a| a.kind == AlertKind::GoalDeadlineApproaching));
        assert_eq!(alerts[0].message, "Goal 'Today' is due today (90.0% saved)");
        assert_eq!(alerts[1].message, "Goal 'Week' is due in 7 days (90.0% saved)");
    }

    #[test]
    fn test_overdue_goal_is_high() {
        let alerts = goal_alerts(&[goal_due_in("Soon", 3), goal_due_in("Late", -1)]);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::GoalOverdue);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].message, "Goal 'Late' is overdue by 1 day");
        assert_eq!(alerts[1].subject.name(), "Soon");
    }

    #[test]
    fn test_achieved_and_undated_goals_never_alert() {
        let mut achieved = goal_due_in("Done", 2);
        achieved.current_amount = Money::from_units(1000);
        let undated = SavingGoal::new(UserId::new(), "Someday", Money::from_units(50));

        assert!(goal_alerts(&[achieved, undated]).is_empty());
    }

    #[test]
    fn test_targets_precede_goals_within_severity() {
        let owner = UserId::new();
        let (target, txn) = target_at(owner, "Fuel", 95);
        let thresholds = ProgressThresholds::default();
        let targets = TargetSummary::build(&[target], &[txn], today(), &thresholds);
        let goals = GoalSummary::build(&[goal_due_in("Trip", 2)], today(), &thresholds);

        let alerts = build_alerts(&targets.lines, &goals.lines, &thresholds);
        let names: Vec<_> = alerts.iter().map(|a| a.subject.name()).collect();
        assert_eq!(names, vec!["Fuel", "Trip"]);
    }
}
