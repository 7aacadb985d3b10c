//! Dashboard, chart and audit commands

use crate::config::Settings;
use crate::display::format_dashboard;
use crate::error::TrackerResult;
use crate::reports::ChartReport;
use crate::services::{budget_statuses, Summary};
use crate::storage::Storage;

/// Print income, expense and savings totals
pub fn handle_dashboard(storage: &Storage, settings: &Settings) {
    let summary = Summary::from_transactions(storage.transactions());
    print!("{}", format_dashboard(&summary, &settings.currency_symbol));

    let over = budget_statuses(storage.budgets(), storage.transactions(), storage.categories())
        .into_iter()
        .filter(|s| s.is_over_budget())
        .count();
    println!();
    println!("Transactions: {}", storage.transactions().len());
    if over > 0 {
        println!("Budgets over limit: {}", over);
    }
}

/// Print the chart series
pub fn handle_charts(storage: &Storage, settings: &Settings) {
    let report = ChartReport::generate(storage);
    print!("{}", report.format_terminal(&settings.currency_symbol));
}

/// Print the most recent audit entries
pub fn handle_audit(storage: &Storage, limit: usize) -> TrackerResult<()> {
    let entries = match storage.audit_log() {
        Some(log) => log.tail(limit)?,
        None => Vec::new(),
    };

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.summary());
    }
    Ok(())
}
