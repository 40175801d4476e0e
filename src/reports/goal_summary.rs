//! Saving goal summary

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::warn;

use super::category_usage::truncate;
use crate::config::ProgressThresholds;
use crate::models::{Money, SavingGoal};
use crate::progress::{evaluate_goal, GoalProgress, GoalStatus};

/// Days counted as one month in the savings-rate estimate
const DAYS_PER_MONTH: i64 = 30;

/// A goal together with its evaluated progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLine {
    pub goal: SavingGoal,
    pub progress: GoalProgress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalStatusCounts {
    pub on_track: usize,
    pub behind: usize,
    pub overdue: usize,
    pub achieved: usize,
}

impl GoalStatusCounts {
    fn record(&mut self, status: GoalStatus) {
        match status {
            GoalStatus::OnTrack => self.on_track += 1,
            GoalStatus::Behind => self.behind += 1,
            GoalStatus::Overdue => self.overdue += 1,
            GoalStatus::Achieved => self.achieved += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.on_track + self.behind + self.overdue + self.achieved
    }
}

/// Aggregate view over a user's saving goals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalSummary {
    pub lines: Vec<GoalLine>,
    pub counts: GoalStatusCounts,
    pub total_target: Money,
    pub total_saved: Money,
    pub total_remaining: Money,
    pub average_percentage: f64,
    /// Achieved goals as a share of all evaluated goals, 0 when there are none
    pub achievement_rate: f64,
    /// Linear estimate of monthly saving across goals with a deadline
    pub monthly_savings_rate: Money,
    /// Highest percentage among goals not yet achieved
    pub closest_to_completion: Option<GoalLine>,
    pub skipped: usize,
}

impl GoalSummary {
    /// Evaluate every goal and aggregate the results
    ///
    /// A goal that fails evaluation is logged, counted in `skipped`, and
    /// otherwise ignored.
    pub fn build(goals: &[SavingGoal], today: NaiveDate, thresholds: &ProgressThresholds) -> Self {
        let mut summary = Self::default();

        for goal in goals {
            match evaluate_goal(goal, today, thresholds) {
                Ok(progress) => summary.lines.push(GoalLine {
                    goal: goal.clone(),
                    progress,
                }),
                Err(e) => {
                    warn!(goal_id = %goal.id, error = %e, "Skipping goal in summary");
                    summary.skipped += 1;
                }
            }
        }

        let mut percentage_sum = 0.0;

        for line in &summary.lines {
            summary.counts.record(line.progress.status);
            summary.total_target += line.goal.target_amount;
            summary.total_saved += line.goal.current_amount;
            summary.total_remaining += line.progress.remaining_amount;
            percentage_sum += line.progress.percentage;

            if line.goal.target_date.is_some() {
                summary.monthly_savings_rate += monthly_rate(&line.goal, today);
            }
        }

        let evaluated = summary.lines.len();
        if evaluated > 0 {
            summary.average_percentage = percentage_sum / evaluated as f64;
            summary.achievement_rate = summary.counts.achieved as f64 * 100.0 / evaluated as f64;
        }

        summary.closest_to_completion = summary
            .lines
            .iter()
            .filter(|l| l.progress.status != GoalStatus::Achieved)
            .min_by(|a, b| closer_to_completion(a, b))
            .cloned();

        summary
    }

    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>7} {:>11} {:>6}  {}\n",
            "Goal", "Saved", "Target", "Done", "Deadline", "Days", "Status"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for line in &self.lines {
            let deadline = line
                .goal
                .target_date
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_else(|| "-".to_string());
            let days = line
                .progress
                .days_remaining
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());

            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>6.1}% {:>11} {:>6}  {}\n",
                truncate(&line.goal.name, 24),
                line.goal.current_amount.format_with_symbol(currency),
                line.goal.target_amount.format_with_symbol(currency),
                line.progress.percentage,
                deadline,
                days,
                line.progress.status,
            ));
        }

        output.push_str(&"-".repeat(86));
        output.push('\n');
        output.push_str(&format!(
            "Saved {} of {}  Remaining {}  Achieved {:.0}%  Saving ~{}/month\n",
            self.total_saved.format_with_symbol(currency),
            self.total_target.format_with_symbol(currency),
            self.total_remaining.format_with_symbol(currency),
            self.achievement_rate,
            self.monthly_savings_rate.format_with_symbol(currency),
        ));

        if let Some(line) = &self.closest_to_completion {
            output.push_str(&format!(
                "Closest to completion: {} ({:.1}%)\n",
                line.goal.name, line.progress.percentage
            ));
        }

        if self.skipped > 0 {
            output.push_str(&format!("{} goal(s) could not be evaluated\n", self.skipped));
        }

        output
    }
}

/// Balance divided by whole months since creation, at least one month
fn monthly_rate(goal: &SavingGoal, today: NaiveDate) -> Money {
    let days = (today - goal.created_date()).num_days();
    let months = (days / DAYS_PER_MONTH).max(1);
    goal.current_amount.average_over(months as usize)
}

/// Ordering that puts the line closest to completion first
fn closer_to_completion(a: &GoalLine, b: &GoalLine) -> Ordering {
    b.progress
        .percentage
        .total_cmp(&a.progress.percentage)
        .then_with(|| match (a.goal.target_date, b.goal.target_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.goal.name.cmp(&b.goal.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 7, 1)
    }

    fn goal(name: &str, target: i64, current: i64) -> SavingGoal {
        SavingGoal::new(UserId::new(), name, Money::from_units(target))
            .with_current_amount(Money::from_units(current))
            .created_on(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn build(goals: &[SavingGoal]) -> GoalSummary {
        GoalSummary::build(goals, today(), &ProgressThresholds::default())
    }

    #[test]
    fn test_totals_and_rates() {
        let goals = vec![
            goal("Car", 10_000, 2_000),
            goal("Phone", 1_000, 1_000),
            goal("Trip", 3_000, 600).with_target_date(date(2026, 1, 1)),
        ];

        let summary = build(&goals);

        assert_eq!(summary.counts.achieved, 1);
        assert_eq!(summary.counts.total(), 3);
        assert_eq!(summary.total_target, Money::from_units(14_000));
        assert_eq!(summary.total_saved, Money::from_units(3_600));
        assert_eq!(summary.total_remaining, Money::from_units(10_400));
        assert!((summary.average_percentage - 140.0 / 3.0).abs() < 1e-9);
        assert!((summary.achievement_rate - 100.0 / 3.0).abs() < 1e-9);
        // 181 days since creation -> 6 months; only the dated goal counts
        assert_eq!(summary.monthly_savings_rate, Money::from_units(100));
    }

    #[test]
    fn test_young_goal_counts_as_one_month() {
        let fresh = SavingGoal::new(UserId::new(), "Fresh", Money::from_units(500))
            .with_current_amount(Money::from_units(120))
            .with_target_date(date(2026, 1, 1))
            .created_on(Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap());

        let summary = build(&[fresh]);
        assert_eq!(summary.monthly_savings_rate, Money::from_units(120));
    }

    #[test]
    fn test_closest_to_completion_ties() {
        let undated = goal("Alpha", 100, 60);
        let late = goal("Bravo", 100, 60).with_target_date(date(2026, 6, 1));
        let early = goal("Charlie", 100, 60).with_target_date(date(2026, 3, 1));
        let done = goal("Done", 100, 100);

        let summary = build(&[undated.clone(), late.clone(), early.clone(), done]);
        assert_eq!(summary.closest_to_completion.unwrap().goal.id, early.id);

        let summary = build(&[undated.clone(), late.clone()]);
        assert_eq!(summary.closest_to_completion.unwrap().goal.id, late.id);

        let other = goal("Aardvark", 100, 60);
        let summary = build(&[undated, other.clone()]);
        assert_eq!(summary.closest_to_completion.unwrap().goal.id, other.id);
    }

    #[test]
    fn test_empty_and_malformed() {
        let empty = build(&[]);
        assert_eq!(empty.achievement_rate, 0.0);
        assert_eq!(empty.average_percentage, 0.0);
        assert!(empty.closest_to_completion.is_none());

        let mut broken = goal("Broken", 100, 0);
        broken.target_amount = Money::zero();
        let summary = build(&[broken, goal("Fine", 100, 10)]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.achievement_rate, 0.0);
    }

    #[test]
    fn test_format_terminal() {
        let summary = build(&[goal("Car", 10_000, 2_500)]);
        let text = summary.format_terminal("$", "%Y-%m-%d");
        assert!(text.contains("Car"));
        assert!(text.contains("25.0%"));
        assert!(text.contains("Closest to completion: Car"));
    }
}
