//! Transaction model
//!
//! A single income or expense event. Only the description may change after
//! creation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{
    deserialize_optional_category, deserialize_transaction_id, CategoryId, TransactionId,
};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identity; records written without one get a fresh id on load
    #[serde(default, deserialize_with = "deserialize_transaction_id")]
    pub id: TransactionId,

    pub description: String,

    /// Always positive; the direction is carried by `kind`
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Category reference; may point at a category that was since deleted
    #[serde(default, deserialize_with = "deserialize_optional_category")]
    pub category: Option<CategoryId>,

    pub date: NaiveDate,

    /// When the transaction was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with the current instant
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: Option<CategoryId>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            description: description.into(),
            amount,
            kind,
            category,
            date,
            timestamp: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Whether this is an expense booked against the given category
    pub fn is_expense_in(&self, category: CategoryId) -> bool {
        self.is_expense() && self.category == Some(category)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.kind
        )
    }
}
