//! Progress and status evaluation
//!
//! Pure functions that turn a budget target or a saving goal into a derived
//! progress view. Every date-dependent call takes `today` explicitly; nothing
//! in here reads the clock, logs, or touches storage.

pub mod events;
pub mod funds;
pub mod goal;
pub mod milestones;
pub mod target;

pub use events::{budget_exceeded, ProgressEvent};
pub use funds::{deposit, withdraw, FundOperation, FundOutcome};
pub use goal::{evaluate_goal, goal_percentage, GoalProgress, GoalStatus};
pub use milestones::{crossed_between, CrossingDirection, Milestone, MilestoneCrossing};
pub use target::{evaluate_target, TargetProgress, TargetStatus};
