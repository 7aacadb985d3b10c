//! Transaction CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list, format_transaction_row};
use crate::error::{TrackerError, TrackerResult};
use crate::models::TransactionType;
use crate::services::{
    filter_transactions, AddOutcome, Confirm, TransactionFilter, TransactionInput,
    TransactionService,
};
use crate::storage::Storage;

use super::resolve_category;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// What the money was for
        description: String,
        /// Amount (e.g., "45.99" or "1,250")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// income or expense
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, optionally filtered
    List {
        /// Case-insensitive text to look for in description, amount or category
        #[arg(short, long)]
        search: Option<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Calendar month (1-12), any year
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (full, or the short txn-xxxxxxxx form)
        id: String,
    },

    /// Change a transaction's description
    Edit {
        /// Transaction ID
        id: String,
        /// New description
        description: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &mut Storage,
    settings: &Settings,
    confirm: &mut dyn Confirm,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let category = category
                .map(|c| resolve_category(storage, &c))
                .transpose()?;
            let today = Local::now().date_naive();
            let date = date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
            let input = TransactionInput::new(description, amount, kind, date).with_category(category);

            let mut service = TransactionService::new(storage);
            match service.add(&input, today, confirm)? {
                AddOutcome::Added(txn) => {
                    println!("Transaction added successfully!");
                    println!(
                        "  {}",
                        format_transaction_row(&txn, storage.categories(), symbol, &settings.date_format)
                    );
                }
                AddOutcome::InsufficientBalance { add_income_first } => {
                    println!("Expense not added: insufficient balance.");
                    if add_income_first {
                        println!("Record income first with: fintrack transaction add <description> <amount> --type income");
                    }
                }
                AddOutcome::DeclinedOverBudget => {
                    println!("Expense not added.");
                }
            }
        }

        TransactionCommands::List {
            search,
            kind,
            category,
            month,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(term) = search {
                filter = filter.search(term);
            }
            if let Some(kind) = kind {
                let kind = kind
                    .parse::<TransactionType>()
                    .map_err(TrackerError::Validation)?;
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(resolve_category(storage, &category)?);
            }
            if let Some(month) = month {
                filter = filter.month(month);
            }

            let rows = filter_transactions(storage.transactions(), storage.categories(), &filter);
            print!(
                "{}",
                format_transaction_list(&rows, storage.categories(), symbol, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let service = TransactionService::new(storage);
            let index = service.position_of(&id)?;
            let txn = &storage.transactions()[index];
            print!("{}", format_transaction_details(txn, storage.categories(), symbol));
        }

        TransactionCommands::Edit { id, description } => {
            let mut service = TransactionService::new(storage);
            match service.update_description(&id, &description)? {
                Some(txn) => println!("Updated {}: {}", txn.id, txn.description),
                None => println!("Description is empty; nothing changed."),
            }
        }

        TransactionCommands::Delete { id } => {
            let mut service = TransactionService::new(storage);
            let removed = service.delete(&id)?;
            println!("Deleted {}: {}", removed.id, removed.description);
        }
    }

    Ok(())
}
