//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{category_name, BudgetPeriod, Money};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::resolve_category;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets with spending status
    List,

    /// Set a spending ceiling for a category
    Add {
        /// Category name or ID
        category: String,
        /// Budget amount (e.g., "200" or "200.00")
        amount: String,
        /// weekly, monthly or yearly (defaults to the configured period)
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
    },

    /// Delete a budget by its position in `budget list`
    Delete {
        /// Position shown by `budget list`
        index: usize,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List => {
            let service = BudgetService::new(storage);
            print!("{}", format_budget_list(&service.statuses(), symbol));
        }

        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let category = resolve_category(storage, &category)?;
            let amount = Money::parse(&amount)
                .map_err(|e| TrackerError::Validation(format!("Invalid budget amount: {}", e)))?;
            let period = period.unwrap_or(settings.default_budget_period);

            let budget = BudgetService::new(storage).create(category, amount, period)?;
            println!(
                "Created {} budget of {} for {}",
                budget.period,
                budget.amount.format_with_symbol(symbol),
                category_name(storage.categories(), Some(budget.category))
            );
        }

        BudgetCommands::Delete { index } => {
            let removed = BudgetService::new(storage).delete_at(index)?;
            println!(
                "Deleted {} budget for {}",
                removed.period,
                category_name(storage.categories(), Some(removed.category))
            );
        }
    }

    Ok(())
}
