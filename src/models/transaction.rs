//! Transaction model
//!
//! A transaction is a single positive money movement, either income or an
//! expense. Its kind is fixed when it is created.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;
use crate::error::FinpulseError;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = FinpulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(FinpulseError::Validation(format!(
                "Unknown transaction kind '{}': expected income or expense",
                other
            ))),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user who owns this transaction
    pub owner: UserId,

    /// Category this transaction is filed under
    pub category_id: CategoryId,

    /// Amount, always positive; direction comes from `kind`
    pub amount: Money,

    /// Income or expense, fixed at creation
    kind: TransactionKind,

    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Calendar day of the movement
    pub date: NaiveDate,

    /// Free-form tags
    #[serde(default)]
    pub tags: BTreeSet<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        owner: UserId,
        kind: TransactionKind,
        category_id: CategoryId,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            owner,
            category_id,
            amount,
            kind,
            note: None,
            date,
            tags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.set_note(Some(note.into()));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_tags(tags);
        self
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Replace the note; blank notes are stored as `None`
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.updated_at = Utc::now();
    }

    /// Replace the tag set; tags are trimmed and blank ones dropped
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
        self.updated_at = Utc::now();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag.trim())
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    /// Check that `category` may label this transaction
    pub fn validate_category(&self, category: &Category) -> Result<(), TransactionValidationError> {
        if category.owner != self.owner {
            return Err(TransactionValidationError::ForeignCategory);
        }
        if category.kind != self.kind {
            return Err(TransactionValidationError::KindMismatch {
                transaction: self.kind,
                category: category.kind,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(f, "{} {}{}", self.date.format("%Y-%m-%d"), sign, self.amount)?;
        if let Some(note) = &self.note {
            write!(f, " {}", note)?;
        }
        Ok(())
    }
}

/// Trim tags, drop blank ones and deduplicate
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    KindMismatch {
        transaction: TransactionKind,
        category: TransactionKind,
    },
    ForeignCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::KindMismatch {
                transaction,
                category,
            } => write!(
                f,
                "{} transaction cannot use a {} category",
                transaction,
                category.to_string().to_lowercase()
            ),
            Self::ForeignCategory => write!(f, "Category belongs to another user"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let owner = UserId::new();
        let category = CategoryId::new();
        let txn = Transaction::new(
            owner,
            TransactionKind::Expense,
            category,
            Money::from_cents(4200),
            day(),
        );
        assert_eq!(txn.kind(), TransactionKind::Expense);
        assert!(txn.is_expense());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionKind::Income,
            CategoryId::new(),
            Money::zero(),
            day(),
        );
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_tags_are_normalized() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionKind::Expense,
            CategoryId::new(),
            Money::from_cents(100),
            day(),
        )
        .with_tags(["  coffee ", "work", "coffee", ""]);

        assert_eq!(txn.tags.len(), 2);
        assert!(txn.has_tag("coffee"));
        assert!(txn.has_tag(" work"));
    }

    #[test]
    fn test_blank_note_is_none() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionKind::Expense,
            CategoryId::new(),
            Money::from_cents(100),
            day(),
        )
        .with_note("   ");
        assert!(txn.note.is_none());
    }

    #[test]
    fn test_category_kind_must_match() {
        let owner = UserId::new();
        let salary = Category::new(owner, "Salary", TransactionKind::Income);
        let txn = Transaction::new(
            owner,
            TransactionKind::Expense,
            salary.id,
            Money::from_cents(100),
            day(),
        );
        assert_eq!(
            txn.validate_category(&salary),
            Err(TransactionValidationError::KindMismatch {
                transaction: TransactionKind::Expense,
                category: TransactionKind::Income,
            })
        );

        let groceries = Category::new(owner, "Groceries", TransactionKind::Expense);
        assert!(txn.validate_category(&groceries).is_ok());

        let someone_elses = Category::new(UserId::new(), "Groceries", TransactionKind::Expense);
        assert_eq!(
            txn.validate_category(&someone_elses),
            Err(TransactionValidationError::ForeignCategory)
        );
    }

    #[test]
    fn test_serialization_keeps_kind() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionKind::Income,
            CategoryId::new(),
            Money::from_cents(250000),
            day(),
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"income\""));
        let restored: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.kind(), TransactionKind::Income);
        assert_eq!(restored, txn);
    }
}
