//! Goal service
//!
//! Saving goal management. Deposits and withdrawals go through
//! `progress::funds` and are only persisted when they succeed.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::config::ProgressThresholds;
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{GoalId, Money, SavingGoal, UserId};
use crate::progress::{self, evaluate_goal, FundOutcome, GoalProgress};
use crate::reports::GoalSummary;
use crate::storage::Storage;

/// Input for creating a saving goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub target_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Amount already saved when the goal is created
    pub initial_amount: Money,
}

/// Service for saving goals
pub struct GoalService<'a> {
    storage: &'a Storage,
    owner: UserId,
    thresholds: ProgressThresholds,
}

impl<'a> GoalService<'a> {
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

    /// Create a goal; a deadline must lie after `today`
    pub fn create(&self, input: NewGoal, today: NaiveDate) -> FinpulseResult<SavingGoal> {
        let mut goal = SavingGoal::new(self.owner, input.name.trim(), input.target_amount)
            .with_current_amount(input.initial_amount);
        if let Some(date) = input.target_date {
            goal = goal.with_target_date(date);
        }
        if let Some(description) = input.description {
            goal = goal.with_description(description);
        }
        goal.validate_new(today)?;
        goal.achieved = goal.current_amount >= goal.target_amount;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;
        info!(goal_id = %goal.id, name = %goal.name, target = %goal.target_amount, "Created goal");

        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> FinpulseResult<Option<SavingGoal>> {
        self.storage.goals.get(self.owner, id)
    }

    /// Find a goal by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FinpulseResult<Option<SavingGoal>> {
        let goals = self.list()?;
        let wanted = identifier.trim().to_lowercase();

        if let Some(goal) = goals.iter().find(|g| g.name.to_lowercase() == wanted) {
            return Ok(Some(goal.clone()));
        }
        Ok(goals.into_iter().find(|g| g.id.matches_str(identifier)))
    }

    pub fn resolve(&self, identifier: &str) -> FinpulseResult<SavingGoal> {
        self.find(identifier)?
            .ok_or_else(|| FinpulseError::goal_not_found(identifier))
    }

    pub fn list(&self) -> FinpulseResult<Vec<SavingGoal>> {
        self.storage.goals.list(self.owner)
    }

    pub fn deposit(&self, id: GoalId, amount: Money) -> FinpulseResult<FundOutcome> {
        self.fund(id, |goal| progress::deposit(goal, amount, Utc::now()))
    }

    pub fn withdraw(&self, id: GoalId, amount: Money) -> FinpulseResult<FundOutcome> {
        self.fund(id, |goal| progress::withdraw(goal, amount, Utc::now()))
    }

    pub fn toggle_achieved(&self, id: GoalId) -> FinpulseResult<SavingGoal> {
        let mut goal = self.require(id)?;
        let before = goal.clone();
        goal.toggle_achieved();

        self.persist_update(&before, &goal)?;
        info!(goal_id = %goal.id, achieved = goal.achieved, "Toggled goal achievement");

        Ok(goal)
    }

    pub fn delete(&self, id: GoalId) -> FinpulseResult<SavingGoal> {
        let goal = self
            .storage
            .goals
            .delete(self.owner, id)?
            .ok_or_else(|| FinpulseError::goal_not_found(id.to_string()))?;
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;
        info!(goal_id = %goal.id, name = %goal.name, "Deleted goal");

        Ok(goal)
    }

    pub fn progress(&self, id: GoalId, today: NaiveDate) -> FinpulseResult<GoalProgress> {
        let goal = self.require(id)?;
        evaluate_goal(&goal, today, &self.thresholds)
    }

    /// Every goal with its progress; malformed goals are skipped
    pub fn list_progress(&self, today: NaiveDate) -> FinpulseResult<GoalSummary> {
        Ok(GoalSummary::build(&self.list()?, today, &self.thresholds))
    }

    fn fund<F>(&self, id: GoalId, operation: F) -> FinpulseResult<FundOutcome>
    where
        F: FnOnce(&mut SavingGoal) -> FinpulseResult<FundOutcome>,
    {
        let mut goal = self.require(id)?;
        let before = goal.clone();
        let outcome = operation(&mut goal)?;

        self.persist_update(&before, &goal)?;
        info!(
            goal_id = %goal.id,
            operation = %outcome.operation,
            amount = %outcome.amount,
            balance = %outcome.new_amount,
            completed = outcome.goal_completed,
            "Moved goal funds"
        );

        Ok(outcome)
    }

    fn require(&self, id: GoalId) -> FinpulseResult<SavingGoal> {
        self.get(id)?
            .ok_or_else(|| FinpulseError::goal_not_found(id.to_string()))
    }

    fn persist_update(&self, before: &SavingGoal, after: &SavingGoal) -> FinpulseResult<()> {
        self.storage.goals.upsert(after.clone())?;
        self.storage.goals.save()?;
        self.storage.log_update(
            EntityType::Goal,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}
