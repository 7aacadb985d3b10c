//! Derived views over the transaction collection
//!
//! Filtering, totals and budget status. Everything here is a pure function of
//! the collections passed in.

use std::fmt;

use chrono::Datelike;

use crate::models::{
    category_name, Budget, Category, CategoryId, Money, Transaction, TransactionType,
};

/// Criteria for narrowing the transaction list; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub search_term: Option<String>,
    pub kind: Option<TransactionType>,
    pub category_id: Option<CategoryId>,
    /// Calendar month, 1..=12, any year
    pub month: Option<u32>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Whether a transaction satisfies every set criterion
    pub fn matches(&self, transaction: &Transaction, categories: &[Category]) -> bool {
        if let Some(term) = self.search_term.as_deref() {
            if !term.is_empty() && !matches_search(transaction, categories, term) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }

        if let Some(category_id) = self.category_id {
            if transaction.category != Some(category_id) {
                return false;
            }
        }

        if let Some(month) = self.month {
            if transaction.date.month() != month {
                return false;
            }
        }

        true
    }
}

fn matches_search(transaction: &Transaction, categories: &[Category], term: &str) -> bool {
    let term = term.to_lowercase();

    if transaction.description.to_lowercase().contains(&term) {
        return true;
    }

    if transaction.amount.to_plain_string().contains(&term) {
        return true;
    }

    // Unresolved categories never match, not even on "uncategorized"
    transaction
        .category
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.name.to_lowercase().contains(&term))
        .unwrap_or(false)
}

/// A transaction together with its position in the backing collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredTransaction<'a> {
    pub index: usize,
    pub transaction: &'a Transaction,
}

/// Transactions matching `filter`, in collection order
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
    filter: &TransactionFilter,
) -> Vec<FilteredTransaction<'a>> {
    transactions
        .iter()
        .enumerate()
        .filter(|(_, txn)| filter.matches(txn, categories))
        .map(|(index, transaction)| FilteredTransaction { index, transaction })
        .collect()
}

/// Income, expense and savings totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub savings: Money,
}

impl Summary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();

        for txn in transactions {
            match txn.kind {
                TransactionType::Income => total_income += txn.amount,
                TransactionType::Expense => total_expenses += txn.amount,
            }
        }

        Self {
            total_income,
            total_expenses,
            savings: total_income - total_expenses,
        }
    }
}

/// Total expenses booked against a category
pub fn spent_in_category(transactions: &[Transaction], category: CategoryId) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense_in(category))
        .map(|t| t.amount)
        .sum()
}

/// Whether spending has exceeded the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    OnTrack,
    OverBudget,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On Track"),
            Self::OverBudget => write!(f, "Over Budget"),
        }
    }
}

/// A budget with its spending computed
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category_name: String,
    pub budget: Budget,
    pub spent: Money,
    pub remaining: Money,
    pub state: BudgetState,
}

impl BudgetStatus {
    pub fn compute(budget: &Budget, transactions: &[Transaction], categories: &[Category]) -> Self {
        let spent = spent_in_category(transactions, budget.category);
        let state = if spent > budget.amount {
            BudgetState::OverBudget
        } else {
            BudgetState::OnTrack
        };

        Self {
            category_name: category_name(categories, Some(budget.category)).to_string(),
            budget: budget.clone(),
            spent,
            remaining: budget.amount - spent,
            state,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.state == BudgetState::OverBudget
    }
}

/// Status of every budget, in collection order
pub fn budget_statuses(
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| BudgetStatus::compute(b, transactions, categories))
        .collect()
}
