//! JSON export and import
//!
//! The export document is a direct dump of the three collections:
//! `{ "transactions": [...], "categories": [...], "budgets": [...] }`.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Category, Money, Transaction};
use crate::services::validation::{validate_description, ValidationError};
use crate::storage::Storage;

/// File name used when no export path is given
pub const DEFAULT_EXPORT_FILE: &str = "finance-data.json";

/// Full data set export structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceExport {
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl FinanceExport {
    /// Snapshot the collections held by storage
    pub fn from_storage(storage: &Storage) -> Self {
        Self {
            transactions: storage.transactions().to_vec(),
            categories: storage.categories().to_vec(),
            budgets: storage.budgets().to_vec(),
        }
    }

    /// Check every record against the rules new records must meet, plus the
    /// identities the collections rely on. `today` is the latest date a
    /// transaction may carry.
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(format!("Duplicate category id {}", category.id));
            }
            category
                .validate()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
        }

        let mut transaction_ids = HashSet::new();
        for (index, txn) in self.transactions.iter().enumerate() {
            if !transaction_ids.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id.to_full_string()));
            }
            validate_description(&txn.description)
                .and_then(|()| check_amount(txn.amount))
                .and_then(|()| {
                    if txn.date > today {
                        Err(ValidationError::FutureDate)
                    } else {
                        Ok(())
                    }
                })
                .map_err(|e| format!("Transaction {}: {}", index + 1, e))?;
        }

        for (index, budget) in self.budgets.iter().enumerate() {
            check_amount(budget.amount).map_err(|e| format!("Budget {}: {}", index + 1, e))?;
        }

        Ok(())
    }

    /// Replace every collection in storage with this data set.
    ///
    /// Either all three collections are replaced or none are.
    pub fn apply(self, storage: &mut Storage) -> TrackerResult<()> {
        let counts = (
            self.transactions.len(),
            self.categories.len(),
            self.budgets.len(),
        );

        storage.replace_all(self.transactions, self.categories, self.budgets)?;

        info!(
            transactions = counts.0,
            categories = counts.1,
            budgets = counts.2,
            "data imported"
        );
        Ok(())
    }
}

fn check_amount(amount: Money) -> Result<(), ValidationError> {
    if amount < Money::MIN_AMOUNT {
        Err(ValidationError::InvalidAmount)
    } else if amount > Money::MAX_AMOUNT {
        Err(ValidationError::AmountTooLarge)
    } else {
        Ok(())
    }
}

/// Write the collections as pretty-printed JSON
pub fn export_json<W: Write>(storage: &Storage, writer: &mut W) -> TrackerResult<()> {
    let export = FinanceExport::from_storage(storage);

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Export to a file, replacing it if present
pub fn export_to_file(storage: &Storage, path: &Path) -> TrackerResult<()> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export_json(storage, &mut writer)?;
    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    info!(path = %path.display(), "data exported");
    Ok(())
}

/// Parse and validate an export document
pub fn import_from_json(json_str: &str) -> TrackerResult<FinanceExport> {
    let export: FinanceExport =
        serde_json::from_str(json_str).map_err(|e| TrackerError::Import(e.to_string()))?;

    export
        .validate(Local::now().date_naive())
        .map_err(TrackerError::Import)?;

    Ok(export)
}

/// Read an export file and replace all stored data with it
pub fn import_from_file(storage: &mut Storage, path: &Path) -> TrackerResult<FinanceExport> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|e| TrackerError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let export = import_from_json(&contents)?;
    export.clone().apply(storage)?;
    Ok(export)
}
