//! Reports module for finpulse
//!
//! Pure aggregations over a user's records: category usage, target and goal
//! summaries, alerts, spending trend, and the dashboard that bundles them.

pub mod alerts;
pub mod category_usage;
pub mod dashboard;
pub mod goal_summary;
pub mod target_summary;
pub mod trend;

pub use alerts::{build_alerts, Alert, AlertKind, AlertSeverity, AlertSubject};
pub use category_usage::{CategoryUsage, CategoryUsageEntry};
pub use dashboard::{DashboardInput, DashboardReport};
pub use goal_summary::{GoalLine, GoalStatusCounts, GoalSummary};
pub use target_summary::{TargetLine, TargetStatusCounts, TargetSummary};
pub use trend::{SpendingTrend, TrendLine};
