//! Budget target evaluation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ProgressThresholds;
use crate::error::FinpulseResult;
use crate::models::{Money, Target, TargetId, Transaction};

/// Where a target stands against its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    OnTrack,
    Warning,
    Exceeded,
    /// The target was deactivated
    Completed,
}

impl TargetStatus {
    pub fn all() -> &'static [Self] {
        &[Self::OnTrack, Self::Warning, Self::Exceeded, Self::Completed]
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Derived progress of a budget target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub target_id: TargetId,
    pub current_spending: Money,
    /// Share of the ceiling spent, unclamped (120.0 when 20% over)
    pub percentage: f64,
    /// Ceiling minus spending; negative once exceeded
    pub remaining_amount: Money,
    /// Days from today to the last day of the period. Zero on the last day,
    /// negative once the period has elapsed.
    pub days_remaining: i64,
    pub status: TargetStatus,
}

impl TargetProgress {
    pub fn period_elapsed(&self) -> bool {
        self.days_remaining < 0
    }
}

/// Evaluate `target` against the owner's transactions as of `today`
pub fn evaluate_target(
    target: &Target,
    transactions: &[Transaction],
    today: NaiveDate,
    thresholds: &ProgressThresholds,
) -> FinpulseResult<TargetProgress> {
    target.validate()?;

    let current_spending = target.spending(transactions);
    let percentage = current_spending.percent_of(target.amount).unwrap_or(0.0);

    Ok(TargetProgress {
        target_id: target.id,
        current_spending,
        percentage,
        remaining_amount: target.amount - current_spending,
        days_remaining: (target.period_end - today).num_days(),
        status: classify(target.active, percentage, thresholds),
    })
}

fn classify(active: bool, percentage: f64, thresholds: &ProgressThresholds) -> TargetStatus {
    if !active {
        TargetStatus::Completed
    } else if percentage >= 100.0 {
        TargetStatus::Exceeded
    } else if percentage >= thresholds.warning_percentage {
        TargetStatus::Warning
    } else {
        TargetStatus::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinpulseError;
    use crate::models::{CategoryId, TransactionKind, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target_of(owner: UserId, units: i64) -> Target {
        Target::monthly(owner, "Household", Money::from_units(units), date(2025, 3, 1))
    }

    fn expense(owner: UserId, units: i64, day: u32) -> Transaction {
        Transaction::new(
            owner,
            TransactionKind::Expense,
            CategoryId::new(),
            Money::from_units(units),
            date(2025, 3, day),
        )
    }

    fn evaluate(target: &Target, txns: &[Transaction]) -> TargetProgress {
        evaluate_target(target, txns, date(2025, 3, 20), &ProgressThresholds::default()).unwrap()
    }

    #[test]
    fn test_warning_at_exactly_85_percent() {
        let owner = UserId::new();
        let target = target_of(owner, 1000);
        let txns = vec![expense(owner, 500, 3), expense(owner, 350, 12)];

        let progress = evaluate(&target, &txns);
        assert_eq!(progress.current_spending, Money::from_units(850));
        assert_eq!(progress.percentage, 85.0);
        assert_eq!(progress.remaining_amount, Money::from_units(150));
        assert_eq!(progress.status, TargetStatus::Warning);
    }

    #[test]
    fn test_exceeded_keeps_negative_remaining() {
        let owner = UserId::new();
        let target = target_of(owner, 1000);
        let txns = vec![expense(owner, 1200, 5)];

        let progress = evaluate(&target, &txns);
        assert_eq!(progress.percentage, 120.0);
        assert_eq!(progress.remaining_amount, Money::from_units(-200));
        assert_eq!(progress.status, TargetStatus::Exceeded);
    }

    #[test]
    fn test_inactive_target_is_completed_regardless_of_spend() {
        let owner = UserId::new();
        let mut target = target_of(owner, 100);
        target.toggle_active();

        let progress = evaluate(&target, &[expense(owner, 500, 5)]);
        assert_eq!(progress.status, TargetStatus::Completed);
        assert_eq!(progress.percentage, 500.0);
    }

    #[test]
    fn test_empty_transactions_on_track() {
        let target = target_of(UserId::new(), 300);
        let progress = evaluate(&target, &[]);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, TargetStatus::OnTrack);
        assert_eq!(progress.remaining_amount, Money::from_units(300));
    }

    #[test]
    fn test_days_remaining_convention() {
        let target = target_of(UserId::new(), 300);
        let thresholds = ProgressThresholds::default();

        let mid = evaluate_target(&target, &[], date(2025, 3, 20), &thresholds).unwrap();
        assert_eq!(mid.days_remaining, 11);

        let last_day = evaluate_target(&target, &[], date(2025, 3, 31), &thresholds).unwrap();
        assert_eq!(last_day.days_remaining, 0);
        assert!(!last_day.period_elapsed());

        let after = evaluate_target(&target, &[], date(2025, 4, 2), &thresholds).unwrap();
        assert_eq!(after.days_remaining, -2);
        assert!(after.period_elapsed());
    }

    #[test]
    fn test_invalid_target_is_an_error() {
        let owner = UserId::new();
        let zero = target_of(owner, 0);
        let result = evaluate_target(&zero, &[], date(2025, 3, 1), &ProgressThresholds::default());
        assert!(matches!(result, Err(FinpulseError::InvalidTarget(_))));

        let mut flat = target_of(owner, 10);
        flat.period_start = flat.period_end;
        let result = evaluate_target(&flat, &[], date(2025, 3, 1), &ProgressThresholds::default());
        assert!(matches!(result, Err(FinpulseError::InvalidTarget(_))));
    }

    #[test]
    fn test_status_partition_thresholds() {
        let thresholds = ProgressThresholds::default();
        for (pct, expected) in [
            (0.0, TargetStatus::OnTrack),
            (84.99, TargetStatus::OnTrack),
            (85.0, TargetStatus::Warning),
            (99.99, TargetStatus::Warning),
            (100.0, TargetStatus::Exceeded),
            (250.0, TargetStatus::Exceeded),
        ] {
            assert_eq!(classify(true, pct, &thresholds), expected, "at {}%", pct);
            assert_eq!(classify(false, pct, &thresholds), TargetStatus::Completed);
        }
    }

    #[test]
    fn test_percentage_never_decreases_as_spending_grows() {
        let owner = UserId::new();
        let target = target_of(owner, 777);
        let mut txns = Vec::new();
        let mut last = 0.0;
        for step in 1..40 {
            txns.push(expense(owner, step * 3, (step % 28 + 1) as u32));
            let pct = evaluate(&target, &txns).percentage;
            assert!(pct >= last);
            last = pct;
        }
    }

    #[test]
    fn test_custom_warning_threshold() {
        let owner = UserId::new();
        let target = target_of(owner, 100);
        let thresholds = ProgressThresholds {
            warning_percentage: 50.0,
            ..ProgressThresholds::default()
        };
        let progress =
            evaluate_target(&target, &[expense(owner, 60, 2)], date(2025, 3, 5), &thresholds).unwrap();
        assert_eq!(progress.status, TargetStatus::Warning);
    }
}
