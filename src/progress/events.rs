//! Notification events returned to callers
//!
//! The engine never displays or schedules anything. It hands these plain
//! records back and lets the notification side decide what to do with them.

use serde::{Deserialize, Serialize};

use super::milestones::{CrossingDirection, Milestone};
use super::target::{TargetProgress, TargetStatus};
use crate::models::{GoalId, Money, Target, TargetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    MilestoneCrossed {
        goal_id: GoalId,
        goal_name: String,
        milestone: Milestone,
        direction: CrossingDirection,
    },
    GoalCompleted {
        goal_id: GoalId,
        goal_name: String,
        saved: Money,
    },
    BudgetExceeded {
        target_id: TargetId,
        target_name: String,
        spent: Money,
        percentage: f64,
    },
}

impl ProgressEvent {
    /// Short tag for logs and the notification queue
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MilestoneCrossed { .. } => "milestone_crossed",
            Self::GoalCompleted { .. } => "goal_completed",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MilestoneCrossed {
                goal_name,
                milestone,
                direction: CrossingDirection::Up,
                ..
            } => format!("'{}' reached {} of its goal", goal_name, milestone),
            Self::MilestoneCrossed {
                goal_name,
                milestone,
                direction: CrossingDirection::Down,
                ..
            } => format!("'{}' dropped below {} of its goal", goal_name, milestone),
            Self::GoalCompleted {
                goal_name, saved, ..
            } => format!("Goal '{}' completed with {} saved", goal_name, saved),
            Self::BudgetExceeded {
                target_name,
                percentage,
                ..
            } => format!("Budget '{}' exceeded ({:.1}% used)", target_name, percentage),
        }
    }
}

/// Event for a target that moved into `Exceeded` between two evaluations
pub fn budget_exceeded(
    target: &Target,
    before: &TargetProgress,
    after: &TargetProgress,
) -> Option<ProgressEvent> {
    let crossed = before.status != TargetStatus::Exceeded && after.status == TargetStatus::Exceeded;
    crossed.then(|| ProgressEvent::BudgetExceeded {
        target_id: target.id,
        target_name: target.name.clone(),
        spent: after.current_spending,
        percentage: after.percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = ProgressEvent::GoalCompleted {
            goal_id: GoalId::new(),
            goal_name: "Vacation".into(),
            saved: Money::from_units(3000),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "goal_completed");
        assert_eq!(json["saved"], 300000);
        assert_eq!(event.kind(), "goal_completed");
    }

    #[test]
    fn test_messages() {
        let reached = ProgressEvent::MilestoneCrossed {
            goal_id: GoalId::new(),
            goal_name: "Car".into(),
            milestone: Milestone::Half,
            direction: CrossingDirection::Up,
        };
        assert_eq!(reached.message(), "'Car' reached 50% of its goal");

        let exceeded = ProgressEvent::BudgetExceeded {
            target_id: TargetId::new(),
            target_name: "Dining".into(),
            spent: Money::from_units(120),
            percentage: 120.0,
        };
        assert_eq!(exceeded.message(), "Budget 'Dining' exceeded (120.0% used)");
    }
}
