//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for the CLI. Report views format
//! themselves through `format_terminal`.

pub mod audit;
pub mod category;
pub mod goal;
pub mod target;
pub mod transaction;

pub use audit::format_history;
pub use category::format_category_list;
pub use goal::{format_fund_outcome, format_goal_details};
pub use target::{format_budget_events, format_target_details};
pub use transaction::{format_transaction_details, format_transaction_register};
