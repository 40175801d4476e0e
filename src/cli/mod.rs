//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod goal;
pub mod report;
pub mod target;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_alerts, handle_history, handle_report};
pub use target::{handle_target_command, TargetCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{parse_date, Money};

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_amount(input: &str) -> FinpulseResult<Money> {
    Money::parse(input).map_err(|e| FinpulseError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_optional_date(input: Option<&str>) -> FinpulseResult<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("$12.5").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
        assert!(parse_amount("--5").unwrap_err().is_validation());
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2025-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert!(parse_optional_date(Some("03/01/2025")).is_err());
    }
}
