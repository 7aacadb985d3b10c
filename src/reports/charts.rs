//! Chart series
//!
//! Aggregates behind the three dashboard charts: spending per category,
//! income against expenses, and month-by-month trends. Series keep the order
//! in which their keys first appear in the transaction collection.

use crate::display::report::{format_bar, truncate};
use crate::models::{category_name, Category, Money, Transaction, TransactionType};
use crate::services::Summary;
use crate::storage::Storage;

const BAR_WIDTH: usize = 30;

/// Total expense under one category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpending {
    pub name: String,
    pub total: Money,
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTrend {
    /// Month label, e.g. "Jan 2025"
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

/// Expense totals keyed by category name.
///
/// Categories sharing a name are merged. Missing or deleted categories count
/// as "Uncategorized".
pub fn spending_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpending> {
    let mut series: Vec<CategorySpending> = Vec::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let name = category_name(categories, txn.category);
        match series.iter_mut().find(|s| s.name == name) {
            Some(entry) => entry.total += txn.amount,
            None => series.push(CategorySpending {
                name: name.to_string(),
                total: txn.amount,
            }),
        }
    }

    series
}

/// Income and expense totals per "Mon YYYY"
pub fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    let mut series: Vec<MonthlyTrend> = Vec::new();

    for txn in transactions {
        let label = txn.date.format("%b %Y").to_string();
        let index = match series.iter().position(|m| m.label == label) {
            Some(index) => index,
            None => {
                series.push(MonthlyTrend {
                    label,
                    income: Money::zero(),
                    expense: Money::zero(),
                });
                series.len() - 1
            }
        };

        let entry = &mut series[index];
        match txn.kind {
            TransactionType::Income => entry.income += txn.amount,
            TransactionType::Expense => entry.expense += txn.amount,
        }
    }

    series
}

/// All chart series for the current data
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub spending_by_category: Vec<CategorySpending>,
    pub total_income: Money,
    pub total_expenses: Money,
    pub monthly_trends: Vec<MonthlyTrend>,
}

impl ChartReport {
    /// Generate chart series from storage
    pub fn generate(storage: &Storage) -> Self {
        Self::from_collections(storage.transactions(), storage.categories())
    }

    pub fn from_collections(transactions: &[Transaction], categories: &[Category]) -> Self {
        let summary = Summary::from_transactions(transactions);

        Self {
            spending_by_category: spending_by_category(transactions, categories),
            total_income: summary.total_income,
            total_expenses: summary.total_expenses,
            monthly_trends: monthly_trends(transactions),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        if self.spending_by_category.is_empty() {
            output.push_str("No expenses recorded.\n");
        } else {
            let max = self
                .spending_by_category
                .iter()
                .map(|s| s.total.to_f64())
                .fold(0.0, f64::max);
            for entry in &self.spending_by_category {
                output.push_str(&format!(
                    "{:<20} {} {:>14}\n",
                    truncate(&entry.name, 20),
                    format_bar(entry.total.to_f64(), max, BAR_WIDTH),
                    entry.total.format_with_symbol(symbol)
                ));
            }
        }

        output.push_str("\nIncome vs Expenses\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        let max = self.total_income.to_f64().max(self.total_expenses.to_f64());
        for (label, amount) in [("Income", self.total_income), ("Expenses", self.total_expenses)] {
            output.push_str(&format!(
                "{:<20} {} {:>14}\n",
                label,
                format_bar(amount.to_f64(), max, BAR_WIDTH),
                amount.format_with_symbol(symbol)
            ));
        }

        output.push_str("\nMonthly Trends\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        if self.monthly_trends.is_empty() {
            output.push_str("No transactions recorded.\n");
        } else {
            output.push_str(&format!("{:<12} {:>16} {:>16}\n", "Month", "Income", "Expenses"));
            output.push_str(&"-".repeat(46));
            output.push('\n');
            for month in &self.monthly_trends {
                output.push_str(&format!(
                    "{:<12} {:>16} {:>16}\n",
                    month.label,
                    month.income.format_with_symbol(symbol),
                    month.expense.format_with_symbol(symbol)
                ));
            }
        }

        output
    }
}
