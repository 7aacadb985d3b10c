//! Whole-dataset operations

use tracing::info;

use crate::error::TrackerResult;
use crate::storage::Storage;

use super::confirm::{Confirm, ConfirmPrompt};

/// Service for operations spanning every collection
pub struct DataService<'a> {
    storage: &'a mut Storage,
}

impl<'a> DataService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Wipe the store and every collection once the user confirms.
    ///
    /// Returns whether anything was reset.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> TrackerResult<bool> {
        if !confirm.confirm(&ConfirmPrompt::ResetAllData) {
            return Ok(false);
        }

        let transactions = self.storage.transactions().len();
        let categories = self.storage.categories().len();
        let budgets = self.storage.budgets().len();

        self.storage.clear_all()?;
        info!(transactions, categories, budgets, "all data reset");

        Ok(true)
    }
}
