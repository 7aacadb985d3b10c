//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::TrackerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their positions
    List,

    /// Create a new category
    Add {
        /// Category name (up to 50 characters)
        name: String,
    },

    /// Delete a category by its position in `category list`
    Delete {
        /// Position shown by `category list`
        index: usize,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &mut Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let mut service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(service.list()));
        }

        CategoryCommands::Add { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Delete { index } => {
            let removed = service.delete_at(index)?;
            println!("Deleted category: {}", removed.name);
            println!("Transactions and budgets using it now show as Uncategorized.");
        }
    }

    Ok(())
}
