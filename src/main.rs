use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_tracker::cli::{
    handle_audit, handle_budget_command, handle_category_command, handle_charts, handle_config,
    handle_dashboard, handle_export, handle_import, handle_reset, handle_transaction_command,
    TerminalConfirm,
};
use finance_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use finance_tracker::services::{AlwaysConfirm, Confirm};
use finance_tracker::storage::{initialize_storage, Storage};

/// Environment variable holding the tracing filter directive
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Local-first personal finance tracker",
    long_about = "fintrack records income and expenses, groups them into categories, \
                  tracks spending against per-category budgets and summarizes where \
                  the money went, all from the command line."
)]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    /// Directory holding the tracker's data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finance_tracker::cli::TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finance_tracker::cli::CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(finance_tracker::cli::BudgetCommands),

    /// Show income, expense and savings totals
    Dashboard,

    /// Show spending by category and monthly trends
    Charts,

    /// Export all data to a JSON file
    Export {
        /// Output file (defaults to finance-data.json)
        path: Option<PathBuf>,
    },

    /// Replace all data with the contents of an export file
    Import {
        /// Export file to read
        path: PathBuf,
    },

    /// Delete all transactions, categories and budgets
    Reset,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::open(&paths)?;
    initialize_storage(&mut storage, &settings)?;

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(TerminalConfirm::new(settings.currency_symbol.clone()))
    };

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut storage, &settings, confirm.as_mut(), cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&mut storage, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard) => handle_dashboard(&storage, &settings),
        Some(Commands::Charts) => handle_charts(&storage, &settings),
        Some(Commands::Export { path }) => {
            handle_export(&storage, &paths, path)?;
        }
        Some(Commands::Import { path }) => {
            handle_import(&mut storage, path)?;
        }
        Some(Commands::Reset) => {
            handle_reset(&mut storage, confirm.as_mut())?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit(&storage, limit)?;
        }
        Some(Commands::Config) => handle_config(&paths, &settings),
        None => {
            println!("fintrack - Local-first personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack dashboard' to see your totals.");
        }
    }

    Ok(())
}
