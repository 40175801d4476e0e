//! Saving goal evaluation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ProgressThresholds;
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{GoalId, Money, SavingGoal};

/// Where a saving goal stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    OnTrack,
    /// Saving slower than the deadline requires
    Behind,
    /// Deadline passed without reaching the target
    Overdue,
    Achieved,
}

impl GoalStatus {
    pub fn all() -> &'static [Self] {
        &[Self::OnTrack, Self::Behind, Self::Overdue, Self::Achieved]
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Behind => write!(f, "Behind"),
            Self::Overdue => write!(f, "Overdue"),
            Self::Achieved => write!(f, "Achieved"),
        }
    }
}

/// Derived progress of a saving goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: GoalId,
    /// Share of the target saved, clamped to `[0, 100]`
    pub percentage: f64,
    /// What is still missing, never negative
    pub remaining_amount: Money,
    /// `None` without a deadline; negative once the deadline has passed
    pub days_remaining: Option<i64>,
    pub status: GoalStatus,
}

/// Clamped completion percentage of a goal balance
///
/// Fails with `InvalidGoal` when the target is not positive.
pub fn goal_percentage(goal: &SavingGoal, current: Money) -> FinpulseResult<f64> {
    let raw = current.percent_of(goal.target_amount).filter(|_| goal.target_amount.is_positive());
    match raw {
        Some(pct) => Ok(pct.clamp(0.0, 100.0)),
        None => Err(FinpulseError::InvalidGoal(format!(
            "'{}' has a non-positive target amount ({})",
            goal.name, goal.target_amount
        ))),
    }
}

/// Evaluate `goal` as of `today`
pub fn evaluate_goal(
    goal: &SavingGoal,
    today: NaiveDate,
    thresholds: &ProgressThresholds,
) -> FinpulseResult<GoalProgress> {
    let percentage = goal_percentage(goal, goal.current_amount)?;

    let remaining = goal.target_amount - goal.current_amount;
    let remaining_amount = if remaining.is_negative() {
        Money::zero()
    } else {
        remaining
    };

    let days_remaining = goal.target_date.map(|d| (d - today).num_days());

    Ok(GoalProgress {
        goal_id: goal.id,
        percentage,
        remaining_amount,
        days_remaining,
        status: classify(goal, percentage, today, thresholds),
    })
}

fn classify(
    goal: &SavingGoal,
    percentage: f64,
    today: NaiveDate,
    thresholds: &ProgressThresholds,
) -> GoalStatus {
    if goal.is_achieved() {
        return GoalStatus::Achieved;
    }

    let Some(deadline) = goal.target_date else {
        return GoalStatus::OnTrack;
    };

    if today > deadline {
        return GoalStatus::Overdue;
    }

    if is_behind(goal.created_date(), deadline, percentage, today, thresholds) {
        GoalStatus::Behind
    } else {
        GoalStatus::OnTrack
    }
}

/// Linear pace check: progress should keep up with elapsed time
///
/// When the creation day is not before the deadline there is no elapsed-time
/// baseline, and a short remaining window marks the goal as behind instead.
fn is_behind(
    created: NaiveDate,
    deadline: NaiveDate,
    percentage: f64,
    today: NaiveDate,
    thresholds: &ProgressThresholds,
) -> bool {
    let total_days = (deadline - created).num_days();
    if total_days <= 0 {
        let days_left = (deadline - today).num_days();
        return days_left < thresholds.behind_fallback_days && percentage < 100.0;
    }

    let elapsed_days = (today - created).num_days().clamp(0, total_days);
    let elapsed_percentage = elapsed_days as f64 * 100.0 / total_days as f64;
    percentage < elapsed_percentage
}
