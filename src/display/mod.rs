//! Display formatting for terminal output
//!
//! Builds the text for list views, the dashboard and budget status.

pub mod budget;
pub mod category;
pub mod dashboard;
pub mod report;
pub mod transaction;

pub use budget::format_budget_list;
pub use category::format_category_list;
pub use dashboard::format_dashboard;
pub use transaction::{format_transaction_details, format_transaction_list, format_transaction_row};
