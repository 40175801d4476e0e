//! Transaction display formatting

use crate::models::{Category, Transaction};
use crate::reports::category_usage::truncate;

fn category_name<'c>(categories: &'c [Category], txn: &Transaction) -> &'c str {
    categories
        .iter()
        .find(|c| c.id == txn.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("(unknown)")
}

fn signed_amount(txn: &Transaction, currency: &str) -> String {
    let sign = if txn.is_expense() { "-" } else { "+" };
    format!("{}{}", sign, txn.amount.format_with_symbol(currency))
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, categories: &[Category], currency: &str, date_format: &str) -> String {
    let note = txn.note.as_deref().unwrap_or("");
    format!(
        "{:<12} {:<10} {:<18} {:>13}  {}",
        txn.id.to_string(),
        txn.date.format(date_format).to_string(),
        truncate(category_name(categories, txn), 18),
        signed_amount(txn, currency),
        truncate(note, 30)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<10} {:<18} {:>13}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, categories, currency, date_format));
        output.push('\n');
    }

    output.push_str(&format!("{} transaction(s)\n", transactions.len()));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("Kind:        {}\n", txn.kind()));
    output.push_str(&format!("Amount:      {}\n", signed_amount(txn, currency)));
    output.push_str(&format!("Category:    {}\n", category_name(categories, txn)));

    if let Some(note) = &txn.note {
        output.push_str(&format!("Note:        {}\n", note));
    }
    if !txn.tags.is_empty() {
        let tags: Vec<&str> = txn.tags.iter().map(String::as_str).collect();
        output.push_str(&format!("Tags:        {}\n", tags.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, TransactionKind, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_register_and_details() {
        let owner = UserId::new();
        let food = Category::new(owner, "Food", TransactionKind::Expense);
        let txn = Transaction::new(
            owner,
            TransactionKind::Expense,
            food.id,
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        )
        .with_note("Bakery")
        .with_tags(["weekend"]);

        let register = format_transaction_register(&[txn.clone()], &[food.clone()], "$", "%Y-%m-%d");
        assert!(register.contains("2025-02-03"));
        assert!(register.contains("Food"));
        assert!(register.contains("-$12.50"));
        assert!(register.contains("1 transaction(s)"));

        let details = format_transaction_details(&txn, &[], "€", "%Y-%m-%d");
        assert!(details.contains("(unknown)"));
        assert!(details.contains("-€12.50"));
        assert!(details.contains("Tags:        weekend"));
    }

    #[test]
    fn test_dates_follow_configured_format() {
        let owner = UserId::new();
        let txn = Transaction::new(
            owner,
            TransactionKind::Expense,
            CategoryId::new(),
            Money::from_cents(500),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        );

        let register = format_transaction_register(&[txn.clone()], &[], "$", "%d/%m/%Y");
        assert!(register.contains("03/02/2025"));
        assert!(!register.contains("2025-02-03"));

        let details = format_transaction_details(&txn, &[], "$", "%b %d, %Y");
        assert!(details.contains("Date:        Feb 03, 2025"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], &[], "$", "%Y-%m-%d"), "No transactions found.\n");
    }
}
