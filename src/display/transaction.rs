//! Transaction display formatting

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{category_name, Category, Transaction};
use crate::services::FilteredTransaction;

use super::report::{separator, truncate};

/// Shown when a filter leaves nothing to list
pub const NO_MATCHES: &str = "No transactions found matching your criteria.";

/// Format a date with a user-supplied strftime pattern, ISO if it is unusable
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    formatted
}

/// Format a single transaction as a list row
pub fn format_transaction_row(
    txn: &Transaction,
    categories: &[Category],
    symbol: &str,
    date_format: &str,
) -> String {
    format!(
        "{:12} {:10} {:30} {:>14} {:7} {}",
        txn.id.to_string(),
        format_date(txn.date, date_format),
        truncate(&txn.description, 30),
        txn.amount.format_with_symbol(symbol),
        txn.kind.as_str(),
        category_name(categories, txn.category)
    )
}

/// Format filtered rows as a list
pub fn format_transaction_list(
    rows: &[FilteredTransaction<'_>],
    categories: &[Category],
    symbol: &str,
    date_format: &str,
) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_MATCHES);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:30} {:>14} {:7} {}\n",
        "ID", "Date", "Description", "Amount", "Type", "Category"
    ));
    output.push_str(&separator(90));
    output.push('\n');

    for row in rows {
        output.push_str(&format_transaction_row(
            row.transaction,
            categories,
            symbol,
            date_format,
        ));
        output.push('\n');
    }

    output.push_str(&format!("\n{} transaction(s)\n", rows.len()));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, categories: &[Category], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id.to_full_string()));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Category:    {}\n",
        category_name(categories, txn.category)
    ));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, CategoryId, Money, TransactionType};
    use crate::services::{filter_transactions, TransactionFilter};

    fn groceries() -> Transaction {
        Transaction::new(
            "Groceries",
            Money::from_cents(4599),
            TransactionType::Expense,
            Some(CategoryId::new(1)),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_row_contains_fields() {
        let txn = groceries();
        let row = format_transaction_row(&txn, &default_categories(), "₹", "%d/%m/%Y");

        assert!(row.starts_with(&txn.id.to_string()));
        assert!(row.contains("15/01/2025"));
        assert!(row.contains("₹45.99"));
        assert!(row.contains("expense"));
        assert!(row.ends_with("Food"));
    }

    #[test]
    fn test_deleted_category_shows_uncategorized() {
        let row = format_transaction_row(&groceries(), &[], "₹", "%Y-%m-%d");
        assert!(row.ends_with("Uncategorized"));
    }

    #[test]
    fn test_empty_list_message() {
        let transactions = vec![groceries()];
        let rows = filter_transactions(&transactions, &[], &TransactionFilter::new().month(7));
        let text = format_transaction_list(&rows, &[], "₹", "%Y-%m-%d");
        assert_eq!(text, "No transactions found matching your criteria.\n");
    }

    #[test]
    fn test_unusable_date_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(format_date(date, "%d.%m.%Y"), "15.01.2025");
        assert_eq!(format_date(date, "%H:%M"), "2025-01-15");
    }

    #[test]
    fn test_details() {
        let txn = groceries();
        let text = format_transaction_details(&txn, &default_categories(), "$");
        assert!(text.contains(&txn.id.to_full_string()));
        assert!(text.contains("Amount:      $45.99"));
        assert!(text.contains("Category:    Food"));
    }
}
