//! Budget target model
//!
//! A target is a spending ceiling over a concrete period, optionally scoped
//! to a single expense category. Spending against it is derived from
//! transactions and never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TargetId, UserId};
use super::money::Money;
use super::period::{DateRange, PeriodKind};
use super::transaction::Transaction;
use crate::error::{FinpulseError, FinpulseResult};

/// A budget target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub owner: UserId,
    pub name: String,

    /// Spending ceiling for the period
    pub amount: Money,

    /// How the period dates were derived
    pub period: PeriodKind,

    /// First day of the period (inclusive)
    pub period_start: NaiveDate,

    /// Last day of the period (inclusive)
    pub period_end: NaiveDate,

    /// `None` means the target applies to every expense
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Target {
    /// Create a target whose period is the one of kind `period` containing `today`
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        amount: Money,
        period: PeriodKind,
        category_id: Option<CategoryId>,
        today: NaiveDate,
    ) -> Self {
        let range = period.range_containing(today);
        let now = Utc::now();
        Self {
            id: TargetId::new(),
            owner,
            name: name.into(),
            amount,
            period,
            period_start: range.start,
            period_end: range.end,
            category_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn monthly(owner: UserId, name: impl Into<String>, amount: Money, today: NaiveDate) -> Self {
        Self::new(owner, name, amount, PeriodKind::Monthly, None, today)
    }

    /// Scope the target to one category
    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.period_start,
            end: self.period_end,
        }
    }

    /// Whether `txn` counts as spending against this target
    pub fn matches(&self, txn: &Transaction) -> bool {
        txn.owner == self.owner
            && txn.is_expense()
            && self.range().contains(txn.date)
            && self.category_id.map_or(true, |c| c == txn.category_id)
    }

    /// Sum of matching expense amounts
    pub fn spending(&self, transactions: &[Transaction]) -> Money {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .map(|t| t.amount)
            .sum()
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Move the target to the period of its kind that contains `today`
    pub fn roll_to(&mut self, today: NaiveDate) {
        let range = self.period.range_containing(today);
        self.period_start = range.start;
        self.period_end = range.end;
        self.updated_at = Utc::now();
    }

    pub fn toggle_active(&mut self) {
        self.active = !self.active;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> FinpulseResult<()> {
        if !self.amount.is_positive() {
            return Err(FinpulseError::InvalidTarget(format!(
                "'{}' has a non-positive amount ({})",
                self.name, self.amount
            )));
        }

        if self.period_start >= self.period_end {
            return Err(FinpulseError::InvalidTarget(format!(
                "'{}' has an empty period ({} to {})",
                self.name, self.period_start, self.period_end
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_target_computes_period() {
        let target = Target::new(
            UserId::new(),
            "Groceries",
            Money::from_units(400),
            PeriodKind::Monthly,
            None,
            date(2025, 4, 17),
        );
        assert_eq!(target.period_start, date(2025, 4, 1));
        assert_eq!(target.period_end, date(2025, 4, 30));
        assert!(target.active);
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let owner = UserId::new();
        let zero = Target::monthly(owner, "Zero", Money::zero(), date(2025, 1, 1));
        assert!(matches!(zero.validate(), Err(FinpulseError::InvalidTarget(_))));

        let mut inverted = Target::monthly(owner, "Inverted", Money::from_units(10), date(2025, 1, 1));
        inverted.period_end = inverted.period_start;
        assert!(matches!(inverted.validate(), Err(FinpulseError::InvalidTarget(_))));
    }

    #[test]
    fn test_matches_filters_kind_period_and_category() {
        let owner = UserId::new();
        let food = CategoryId::new();
        let target = Target::monthly(owner, "Food", Money::from_units(300), date(2025, 1, 10))
            .for_category(food);

        let inside = Transaction::new(owner, TransactionKind::Expense, food, Money::from_units(5), date(2025, 1, 31));
        let outside = Transaction::new(owner, TransactionKind::Expense, food, Money::from_units(5), date(2025, 2, 1));
        let other_cat = Transaction::new(owner, TransactionKind::Expense, CategoryId::new(), Money::from_units(5), date(2025, 1, 5));
        let income = Transaction::new(owner, TransactionKind::Income, food, Money::from_units(5), date(2025, 1, 5));
        let stranger = Transaction::new(UserId::new(), TransactionKind::Expense, food, Money::from_units(5), date(2025, 1, 5));

        assert!(target.matches(&inside));
        assert!(!target.matches(&outside));
        assert!(!target.matches(&other_cat));
        assert!(!target.matches(&income));
        assert!(!target.matches(&stranger));
    }

    #[test]
    fn test_uncategorized_target_counts_all_expenses() {
        let owner = UserId::new();
        let target = Target::monthly(owner, "Everything", Money::from_units(1000), date(2025, 1, 10));
        let txns = vec![
            Transaction::new(owner, TransactionKind::Expense, CategoryId::new(), Money::from_units(100), date(2025, 1, 1)),
            Transaction::new(owner, TransactionKind::Expense, CategoryId::new(), Money::from_units(250), date(2025, 1, 20)),
        ];
        assert_eq!(target.spending(&txns), Money::from_units(350));
    }

    #[test]
    fn test_roll_and_toggle() {
        let mut target = Target::new(
            UserId::new(),
            "Coffee",
            Money::from_units(20),
            PeriodKind::Weekly,
            None,
            date(2025, 1, 15),
        );
        target.roll_to(date(2025, 1, 22));
        assert_eq!(target.period_start, date(2025, 1, 20));
        assert_eq!(target.period_end, date(2025, 1, 26));

        target.toggle_active();
        assert!(!target.active);
        target.toggle_active();
        assert!(target.active);
    }

    #[test]
    fn test_serialization() {
        let target = Target::monthly(UserId::new(), "Rent", Money::from_units(1500), date(2025, 1, 1));
        let json = serde_json::to_string(&target).unwrap();
        let restored: Target = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, target);
        assert!(json.contains("\"period\":\"monthly\""));
    }
}
