//! Dashboard summary formatting

use crate::services::Summary;

/// Format the income, expense and savings figures
pub fn format_dashboard(summary: &Summary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<16} {:>20}\n",
        "Total Income:",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16} {:>20}\n",
        "Total Expenses:",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16} {:>20}\n",
        "Savings:",
        summary.savings.format_with_symbol(symbol)
    ));

    output
}
