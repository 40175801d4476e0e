//! Per-category usage statistics

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Category, CategoryId, Money, Transaction, TransactionKind, UserId};

/// Usage of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUsageEntry {
    pub category_id: CategoryId,
    pub name: String,
    pub kind: TransactionKind,
    pub transaction_count: usize,
    pub total: Money,
    pub average: Money,
    pub last_used: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    count: usize,
    total: Money,
    last_used: Option<NaiveDate>,
}

/// Usage statistics for every category, most used first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryUsage {
    pub entries: Vec<CategoryUsageEntry>,
}

impl CategoryUsage {
    /// Tally `transactions` per category
    ///
    /// Transactions are only counted against a category with the same owner.
    /// Entries are sorted by count (desc), total (desc), then name (asc).
    pub fn collect(categories: &[Category], transactions: &[Transaction]) -> Self {
        let mut tallies: HashMap<(UserId, CategoryId), Tally> = HashMap::new();

        for txn in transactions {
            let tally = tallies.entry((txn.owner, txn.category_id)).or_default();
            tally.count += 1;
            tally.total += txn.amount;
            tally.last_used = tally.last_used.max(Some(txn.date));
        }

        let mut entries: Vec<CategoryUsageEntry> = categories
            .iter()
            .map(|category| {
                let tally = tallies
                    .get(&(category.owner, category.id))
                    .copied()
                    .unwrap_or_default();

                CategoryUsageEntry {
                    category_id: category.id,
                    name: category.name.clone(),
                    kind: category.kind,
                    transaction_count: tally.count,
                    total: tally.total,
                    average: tally.total.average_over(tally.count),
                    last_used: tally.last_used,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.transaction_count
                .cmp(&a.transaction_count)
                .then(b.total.cmp(&a.total))
                .then_with(|| a.name.cmp(&b.name))
                .then(a.category_id.cmp(&b.category_id))
        });

        Self { entries }
    }

    /// The category with the most transactions, if any has been used
    pub fn most_used(&self) -> Option<&CategoryUsageEntry> {
        self.entries.first().filter(|e| e.transaction_count > 0)
    }

    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<28} {:<8} {:>6} {:>12} {:>12} {:>11}\n",
            "Category", "Kind", "Count", "Total", "Average", "Last used"
        ));
        output.push_str(&"-".repeat(82));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<28} {:<8} {:>6} {:>12} {:>12} {:>11}\n",
                truncate(&entry.name, 28),
                entry.kind.to_string(),
                entry.transaction_count,
                entry.total.format_with_symbol(currency),
                entry.average.format_with_symbol(currency),
                entry
                    .last_used
                    .map(|d| d.format(date_format).to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }

        output
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
