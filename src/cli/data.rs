//! Export, import, reset and configuration commands

use std::path::PathBuf;

use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;
use crate::export::{export_to_file, import_from_file};
use crate::services::{Confirm, DataService};
use crate::storage::Storage;

/// Write every collection to a JSON file
pub fn handle_export(
    storage: &Storage,
    paths: &TrackerPaths,
    path: Option<PathBuf>,
) -> TrackerResult<()> {
    let path = path.unwrap_or_else(|| paths.default_export_file());
    export_to_file(storage, &path)?;

    println!("Exported to {}", path.display());
    println!(
        "  {} transactions, {} categories, {} budgets",
        storage.transactions().len(),
        storage.categories().len(),
        storage.budgets().len()
    );
    Ok(())
}

/// Replace every collection with the contents of an export file
pub fn handle_import(storage: &mut Storage, path: PathBuf) -> TrackerResult<()> {
    let export = import_from_file(storage, &path)?;

    println!("Imported from {}", path.display());
    println!(
        "  {} transactions, {} categories, {} budgets",
        export.transactions.len(),
        export.categories.len(),
        export.budgets.len()
    );
    Ok(())
}

/// Wipe all stored data after confirmation
pub fn handle_reset(storage: &mut Storage, confirm: &mut dyn Confirm) -> TrackerResult<()> {
    if DataService::new(storage).reset(confirm)? {
        println!("All data has been reset.");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}

/// Show paths and settings
pub fn handle_config(paths: &TrackerPaths, settings: &Settings) {
    println!("Finance Tracker Configuration");
    println!("=============================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:        {}", settings.currency_symbol);
    println!("  Date format:            {}", settings.date_format);
    println!("  Default budget period:  {}", settings.default_budget_period);
    println!("  Seed default categories: {}", settings.seed_default_categories);
}
