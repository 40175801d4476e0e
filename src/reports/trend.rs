//! Period-over-period spending and income comparison

use serde::Serialize;

use crate::models::{DateRange, Money, Transaction, TransactionKind};

/// Totals of one kind in a window versus the window before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub current: Money,
    pub previous: Money,
    pub change_amount: Money,
    /// `None` when the previous window had nothing to compare against
    pub change_percentage: Option<f64>,
}

impl TrendLine {
    fn new(current: Money, previous: Money) -> Self {
        let change_amount = current - previous;
        Self {
            current,
            previous,
            change_amount,
            change_percentage: change_amount.percent_of(previous),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingTrend {
    pub window: DateRange,
    pub previous_window: DateRange,
    pub expenses: TrendLine,
    pub income: TrendLine,
}

impl SpendingTrend {
    /// Compare `window` with the equally long window that ends the day before it
    pub fn compare(transactions: &[Transaction], window: DateRange) -> Self {
        let previous_window = window.preceding();
        let total = |range: DateRange, kind: TransactionKind| -> Money {
            transactions
                .iter()
                .filter(|t| t.kind() == kind && range.contains(t.date))
                .map(|t| t.amount)
                .sum()
        };

        Self {
            window,
            previous_window,
            expenses: TrendLine::new(
                total(window, TransactionKind::Expense),
                total(previous_window, TransactionKind::Expense),
            ),
            income: TrendLine::new(
                total(window, TransactionKind::Income),
                total(previous_window, TransactionKind::Income),
            ),
        }
    }

    /// Income minus expenses in the current window
    pub fn net(&self) -> Money {
        self.income.current - self.expenses.current
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14} {:>9}\n",
            "", "This period", "Previous", "Change", "%"
        ));
        for (label, line) in [("Expenses", &self.expenses), ("Income", &self.income)] {
            let pct = line
                .change_percentage
                .map(|p| format!("{:+.1}%", p))
                .unwrap_or_else(|| "n/a".to_string());
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14} {:>9}\n",
                label,
                line.current.format_with_symbol(currency),
                line.previous.format_with_symbol(currency),
                line.change_amount.format_with_symbol(currency),
                pct
            ));
        }
        output.push_str(&format!("Net: {}\n", self.net().format_with_symbol(currency)));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, UserId};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn txn(kind: TransactionKind, units: i64, day: NaiveDate) -> Transaction {
        Transaction::new(UserId::new(), kind, CategoryId::new(), Money::from_units(units), day)
    }

    #[test]
    fn test_compare_with_previous_window() {
        let window = DateRange::new(date(3, 11), date(3, 20)).unwrap();
        let txns = vec![
            txn(TransactionKind::Expense, 150, date(3, 15)),
            txn(TransactionKind::Expense, 100, date(3, 5)),
            txn(TransactionKind::Expense, 999, date(3, 21)),
            txn(TransactionKind::Income, 500, date(3, 11)),
        ];

        let trend = SpendingTrend::compare(&txns, window);

        assert_eq!(trend.previous_window, DateRange::new(date(3, 1), date(3, 10)).unwrap());
        assert_eq!(trend.expenses.current, Money::from_units(150));
        assert_eq!(trend.expenses.previous, Money::from_units(100));
        assert_eq!(trend.expenses.change_amount, Money::from_units(50));
        assert_eq!(trend.expenses.change_percentage, Some(50.0));
        assert_eq!(trend.net(), Money::from_units(350));
    }

    #[test]
    fn test_no_previous_activity_has_no_percentage() {
        let window = DateRange::new(date(4, 1), date(4, 30)).unwrap();
        let txns = vec![txn(TransactionKind::Income, 2000, date(4, 25))];

        let trend = SpendingTrend::compare(&txns, window);
        assert_eq!(trend.income.change_amount, Money::from_units(2000));
        assert_eq!(trend.income.change_percentage, None);
        assert_eq!(trend.expenses.change_percentage, None);

        let text = trend.format_terminal("$");
        assert!(text.contains("n/a"));
        assert!(text.contains("Net: $2000.00"));
    }

    #[test]
    fn test_drop_in_spending() {
        let window = DateRange::new(date(6, 2), date(6, 2)).unwrap();
        let txns = vec![
            txn(TransactionKind::Expense, 80, date(6, 1)),
            txn(TransactionKind::Expense, 20, date(6, 2)),
        ];

        let trend = SpendingTrend::compare(&txns, window);
        assert_eq!(trend.expenses.change_percentage, Some(-75.0));
    }
}
