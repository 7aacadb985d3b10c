//! Blocking yes/no decisions
//!
//! Services never talk to a terminal directly. When a workflow needs the
//! user's go-ahead it describes the situation as a `ConfirmPrompt` and asks
//! whatever `Confirm` implementation the caller supplied.

use crate::models::Money;

/// A question a workflow needs answered before it continues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    /// An expense is larger than current savings.
    /// Answering yes means "take me to add income first".
    InsufficientBalance { savings: Money, amount: Money },

    /// An expense would push a category past its budget
    BudgetOverrun {
        category: String,
        spent: Money,
        budget: Money,
        amount: Money,
    },

    /// Wipe every stored collection
    ResetAllData,
}

impl ConfirmPrompt {
    /// Text shown to the user, amounts prefixed with `symbol`
    pub fn message(&self, symbol: &str) -> String {
        match self {
            Self::InsufficientBalance { savings, amount } => format!(
                "Insufficient balance! You cannot add this expense.\n\n\
                 Current savings: {}\n\
                 Expense amount: {}\n\n\
                 Do you want to add income first?",
                savings.format_with_symbol(symbol),
                amount.format_with_symbol(symbol)
            ),
            Self::BudgetOverrun {
                category,
                spent,
                budget,
                amount,
            } => format!(
                "Warning: Adding this expense will exceed your budget for {}!\n\n\
                 Current spent: {}\n\
                 Budget: {}\n\
                 This expense: {}\n\
                 Total after: {}\n\n\
                 Do you want to proceed anyway?",
                category,
                spent.format_with_symbol(symbol),
                budget.format_with_symbol(symbol),
                amount.format_with_symbol(symbol),
                (*spent + *amount).format_with_symbol(symbol)
            ),
            Self::ResetAllData => "Are you sure you want to reset all data?".to_string(),
        }
    }
}

/// Source of answers for `ConfirmPrompt`s
pub trait Confirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

/// Answers yes to everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Answers no to everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        false
    }
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}
