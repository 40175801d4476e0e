//! Saving goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GoalId, UserId};
use super::money::Money;
use crate::error::{FinpulseError, FinpulseResult};

/// A savings objective with an optional deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: GoalId,
    pub owner: UserId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Amount the user wants to save
    pub target_amount: Money,

    /// Amount saved so far, never negative
    #[serde(default)]
    pub current_amount: Money,

    /// Optional deadline
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    #[serde(default = "default_color")]
    pub color: String,

    /// Set manually or when a deposit reaches the target
    #[serde(default)]
    pub achieved: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#3f51b5".to_string()
}

impl SavingGoal {
    pub fn new(owner: UserId, name: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            owner,
            name: name.into(),
            description: None,
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
            color: default_color(),
            achieved: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_current_amount(mut self, amount: Money) -> Self {
        self.current_amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into()).filter(|d: &String| !d.trim().is_empty());
        self
    }

    /// Override the creation timestamp (used when importing history)
    pub fn created_on(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// The day the goal was created, used for pace calculations
    pub fn created_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Achieved by flag or by balance
    pub fn is_achieved(&self) -> bool {
        self.achieved || self.current_amount >= self.target_amount
    }

    pub fn toggle_achieved(&mut self) {
        self.achieved = !self.achieved;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> FinpulseResult<()> {
        if !self.target_amount.is_positive() {
            return Err(FinpulseError::InvalidGoal(format!(
                "'{}' has a non-positive target amount ({})",
                self.name, self.target_amount
            )));
        }

        if self.current_amount.is_negative() {
            return Err(FinpulseError::InvalidAmount(format!(
                "'{}' has a negative balance ({})",
                self.name, self.current_amount
            )));
        }

        Ok(())
    }

    /// Creation-time validation: everything in `validate` plus a future deadline
    pub fn validate_new(&self, today: NaiveDate) -> FinpulseResult<()> {
        if self.name.trim().is_empty() {
            return Err(FinpulseError::Validation("Goal name cannot be empty".into()));
        }

        self.validate()?;

        if let Some(date) = self.target_date {
            if date <= today {
                return Err(FinpulseError::Validation(format!(
                    "Goal target date {} must be after {}",
                    date, today
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for SavingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} of {})", self.name, self.current_amount, self.target_amount)
    }
}
