//! Deposits into and withdrawals from saving goals
//!
//! Both operations validate before touching the goal, so a failed call leaves
//! it exactly as it was. What changed is described by the returned
//! `FundOutcome`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::events::ProgressEvent;
use super::goal::goal_percentage;
use super::milestones::{crossed_between, MilestoneCrossing};
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{GoalId, Money, SavingGoal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundOperation {
    Deposit,
    Withdraw,
}

impl fmt::Display for FundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// Result of a successful fund operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundOutcome {
    pub goal_id: GoalId,
    pub goal_name: String,
    pub operation: FundOperation,
    pub amount: Money,
    pub previous_amount: Money,
    pub new_amount: Money,
    pub previous_percentage: f64,
    pub new_percentage: f64,
    pub milestones: Vec<MilestoneCrossing>,
    /// Set when this deposit completed the goal for the first time
    pub goal_completed: bool,
}

impl FundOutcome {
    /// Notification events for this outcome, milestones first
    pub fn events(&self) -> Vec<ProgressEvent> {
        let mut events: Vec<ProgressEvent> = self
            .milestones
            .iter()
            .map(|c| ProgressEvent::MilestoneCrossed {
                goal_id: self.goal_id,
                goal_name: self.goal_name.clone(),
                milestone: c.milestone,
                direction: c.direction,
            })
            .collect();

        if self.goal_completed {
            events.push(ProgressEvent::GoalCompleted {
                goal_id: self.goal_id,
                goal_name: self.goal_name.clone(),
                saved: self.new_amount,
            });
        }

        events
    }
}

fn require_positive(amount: Money, operation: FundOperation) -> FinpulseResult<()> {
    if !amount.is_positive() {
        return Err(FinpulseError::InvalidAmount(format!(
            "{} amount must be positive, got {}",
            operation, amount
        )));
    }
    Ok(())
}

/// Add `amount` to the goal's balance
pub fn deposit(goal: &mut SavingGoal, amount: Money, now: DateTime<Utc>) -> FinpulseResult<FundOutcome> {
    require_positive(amount, FundOperation::Deposit)?;

    let previous_amount = goal.current_amount;
    let new_amount = previous_amount + amount;
    let previous_percentage = goal_percentage(goal, previous_amount)?;
    let new_percentage = goal_percentage(goal, new_amount)?;

    let goal_completed = !goal.is_achieved() && new_amount >= goal.target_amount;

    goal.current_amount = new_amount;
    if goal_completed {
        goal.achieved = true;
    }
    goal.updated_at = now;

    Ok(FundOutcome {
        goal_id: goal.id,
        goal_name: goal.name.clone(),
        operation: FundOperation::Deposit,
        amount,
        previous_amount,
        new_amount,
        previous_percentage,
        new_percentage,
        milestones: crossed_between(previous_percentage, new_percentage),
        goal_completed,
    })
}

/// Take `amount` out of the goal's balance
///
/// The achieved flag is left alone; un-achieving a goal is a manual toggle.
pub fn withdraw(goal: &mut SavingGoal, amount: Money, now: DateTime<Utc>) -> FinpulseResult<FundOutcome> {
    require_positive(amount, FundOperation::Withdraw)?;

    let previous_amount = goal.current_amount;
    if amount > previous_amount {
        return Err(FinpulseError::InsufficientFunds {
            goal: goal.name.clone(),
            requested: amount,
            available: previous_amount,
        });
    }

    let new_amount = previous_amount - amount;
    let previous_percentage = goal_percentage(goal, previous_amount)?;
    let new_percentage = goal_percentage(goal, new_amount)?;

    goal.current_amount = new_amount;
    goal.updated_at = now;

    Ok(FundOutcome {
        goal_id: goal.id,
        goal_name: goal.name.clone(),
        operation: FundOperation::Withdraw,
        amount,
        previous_amount,
        new_amount,
        previous_percentage,
        new_percentage,
        milestones: crossed_between(previous_percentage, new_percentage),
        goal_completed: false,
    })
}
