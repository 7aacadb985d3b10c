//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod data;
pub mod prompt;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use data::{handle_config, handle_export, handle_import, handle_reset};
pub use prompt::TerminalConfirm;
pub use report::{handle_audit, handle_charts, handle_dashboard};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{TrackerError, TrackerResult};
use crate::models::CategoryId;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Look up a category given by name or ID
pub(crate) fn resolve_category(storage: &mut Storage, identifier: &str) -> TrackerResult<CategoryId> {
    CategoryService::new(storage)
        .find(identifier)
        .map(|c| c.id)
        .ok_or_else(|| TrackerError::category_not_found(identifier))
}
