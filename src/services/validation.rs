//! Transaction validation
//!
//! Field checks run before anything is stored. Every rule is evaluated on its
//! own so a single submission reports all of its problems at once.

use chrono::NaiveDate;

use crate::error::ValidationErrors;
use crate::models::{CategoryId, Money, Transaction, TransactionType};

/// Longest allowed description, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 100;

/// Smallest accepted amount
pub const MIN_AMOUNT: f64 = 0.01;

/// Largest accepted amount
pub const MAX_AMOUNT: f64 = 10_000_000.0;

/// A single violated transaction rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Description is required")]
    DescriptionRequired,

    #[error("Description must be less than 100 characters (got {0})")]
    DescriptionTooLong(usize),

    #[error("Amount must be a positive number greater than ₹0.01")]
    InvalidAmount,

    #[error("Amount cannot exceed ₹10,000,000")]
    AmountTooLarge,

    #[error("Please select a valid transaction type (got '{0}')")]
    InvalidType(String),

    #[error("Date is required")]
    DateRequired,

    #[error("Date must be in YYYY-MM-DD format (got '{0}')")]
    InvalidDate(String),

    #[error("Transaction date cannot be in the future")]
    FutureDate,
}

/// Check a transaction's fields, returning every violated rule.
///
/// An empty list means the input is valid. `today` is the latest date a
/// transaction may carry.
pub fn validate_transaction(
    description: &str,
    amount: f64,
    kind: &str,
    date: &str,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(err) = validate_description(description) {
        errors.push(err);
    }

    if let Err(err) = validate_amount(amount) {
        errors.push(err);
    }

    if kind.parse::<TransactionType>().is_err() {
        errors.push(ValidationError::InvalidType(kind.to_string()));
    }

    if let Err(err) = parse_transaction_date(date, today) {
        errors.push(err);
    }

    errors
}

/// Description rule, shared by creation and later edits
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong(len));
    }

    Ok(())
}

/// Amount rule, shared by transactions and budgets
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount < MIN_AMOUNT {
        Err(ValidationError::InvalidAmount)
    } else if amount > MAX_AMOUNT {
        Err(ValidationError::AmountTooLarge)
    } else {
        Ok(())
    }
}

fn parse_transaction_date(date: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::DateRequired);
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

    // Same-day is allowed
    if parsed > today {
        return Err(ValidationError::FutureDate);
    }

    Ok(parsed)
}

/// Read a user-typed amount the way a number input would.
///
/// A leading currency symbol and thousands separators are ignored; anything
/// unreadable becomes NaN and fails the amount rule.
pub fn parse_amount_input(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .trim_start_matches(&['₹', '$'][..])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Whether an expense of `amount` is covered by current savings
pub fn check_sufficient_balance(amount: Money, current_savings: Money) -> bool {
    amount <= current_savings
}

/// Whether adding `amount` to `existing_spent` would exceed `budget_amount`
pub fn check_budget_overrun(amount: Money, existing_spent: Money, budget_amount: Money) -> bool {
    existing_spent + amount > budget_amount
}

/// Raw transaction fields as typed by the user
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub category: Option<CategoryId>,
    pub date: String,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        kind: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            kind: kind.into(),
            category: None,
            date: date.into(),
        }
    }

    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Validate every field and convert to typed values
    pub fn validate(&self, today: NaiveDate) -> Result<ValidTransaction, ValidationErrors> {
        let amount = parse_amount_input(&self.amount);
        let errors = validate_transaction(&self.description, amount, &self.kind, &self.date, today);
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let invalid = |err| ValidationErrors(vec![err]);
        let kind = self
            .kind
            .parse::<TransactionType>()
            .map_err(|_| invalid(ValidationError::InvalidType(self.kind.clone())))?;
        let date = parse_transaction_date(&self.date, today).map_err(invalid)?;
        let amount = Money::from_f64(amount).ok_or_else(|| invalid(ValidationError::InvalidAmount))?;

        Ok(ValidTransaction {
            description: self.description.trim().to_string(),
            amount,
            kind,
            category: self.category,
            date,
        })
    }
}

/// Transaction fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: Option<CategoryId>,
    pub date: NaiveDate,
}

impl ValidTransaction {
    /// Build the transaction, stamping the creation time
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(
            self.description,
            self.amount,
            self.kind,
            self.category,
            self.date,
        )
    }
}
