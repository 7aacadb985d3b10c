//! Business logic for the finance tracker
//!
//! Validation and query functions are pure. The `*Service` types route every
//! mutation through `Storage` so each change is persisted and audited.

pub mod budget;
pub mod category;
pub mod confirm;
pub mod data;
pub mod query;
pub mod transaction;
pub mod validation;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use confirm::{AlwaysConfirm, Confirm, ConfirmPrompt, NeverConfirm};
pub use data::DataService;
pub use query::{
    budget_statuses, filter_transactions, spent_in_category, BudgetState, BudgetStatus,
    FilteredTransaction, Summary, TransactionFilter,
};
pub use transaction::{AddOutcome, TransactionService};
pub use validation::{
    check_budget_overrun, check_sufficient_balance, validate_transaction, TransactionInput,
    ValidTransaction, ValidationError,
};
