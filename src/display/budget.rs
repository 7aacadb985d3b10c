//! Budget display formatting

use crate::services::BudgetStatus;

use super::report::{separator, truncate};

/// Format a single budget status row
pub fn format_budget_row(index: usize, status: &BudgetStatus, symbol: &str) -> String {
    format!(
        "{:>5}  {:<20} {:>14} {:<8} {:>14} {:>14}  {}",
        index,
        truncate(&status.category_name, 20),
        status.budget.amount.format_with_symbol(symbol),
        status.budget.period.to_string(),
        status.spent.format_with_symbol(symbol),
        status.remaining.format_with_symbol(symbol),
        status.state
    )
}

/// Format every budget with its spending status
pub fn format_budget_list(statuses: &[BudgetStatus], symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budgets defined.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<20} {:>14} {:<8} {:>14} {:>14}  {}\n",
        "#", "Category", "Budget", "Period", "Spent", "Remaining", "Status"
    ));
    output.push_str(&separator(96));
    output.push('\n');

    for (index, status) in statuses.iter().enumerate() {
        output.push_str(&format_budget_row(index, status, symbol));
        output.push('\n');
    }

    let over = statuses.iter().filter(|s| s.is_over_budget()).count();
    if over > 0 {
        output.push_str(&format!("\n{} budget(s) over budget\n", over));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, Budget, BudgetPeriod, CategoryId, Money, Transaction, TransactionType};
    use crate::services::budget_statuses;
    use chrono::NaiveDate;

    #[test]
    fn test_budget_list() {
        let transactions = vec![Transaction::new(
            "Groceries",
            Money::from_units(180),
            TransactionType::Expense,
            Some(CategoryId::new(1)),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )];
        let budgets = vec![
            Budget::new(CategoryId::new(1), Money::from_units(150), BudgetPeriod::Monthly),
            Budget::new(CategoryId::new(4), Money::from_units(900), BudgetPeriod::Yearly),
        ];
        let statuses = budget_statuses(&budgets, &transactions, &default_categories());
        let text = format_budget_list(&statuses, "₹");

        assert!(text.contains("Food"));
        assert!(text.contains("₹180.00"));
        assert!(text.contains("-₹30.00"));
        assert!(text.contains("Over Budget"));
        assert!(text.contains("On Track"));
        assert!(text.contains("1 budget(s) over budget"));
    }

    #[test]
    fn test_empty_budget_list() {
        assert_eq!(format_budget_list(&[], "₹"), "No budgets defined.\n");
    }
}
