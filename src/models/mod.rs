//! Core data models for the finance tracker
//!
//! Transactions, categories and budgets, plus the `Money` and id types they
//! are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{active_budget, Budget, BudgetPeriod};
pub use category::{
    category_name, default_categories, Category, CategoryValidationError, DefaultCategory,
    UNCATEGORIZED,
};
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionType};
