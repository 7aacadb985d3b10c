//! Transaction service
//!
//! Adding a transaction runs the full workflow: field validation, the
//! balance check and the budget overrun check, each of which can stop the
//! add. Edits are limited to the description.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::{Action, AuditEntry};
use crate::error::{TrackerError, TrackerResult, ValidationErrors};
use crate::models::{active_budget, Transaction, TransactionId, TransactionType};
use crate::storage::{Storage, StorageKey};

use super::confirm::{Confirm, ConfirmPrompt};
use super::query::{filter_transactions, spent_in_category, FilteredTransaction, Summary, TransactionFilter};
use super::validation::{
    check_budget_overrun, check_sufficient_balance, validate_description, TransactionInput,
};

/// What happened to an add request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Stored
    Added(Transaction),
    /// Expense exceeds savings; never stored. `add_income_first` carries the
    /// user's answer to the follow-up question.
    InsufficientBalance { add_income_first: bool },
    /// The user declined to go over budget; not stored
    DeclinedOverBudget,
}

impl AddOutcome {
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            Self::Added(txn) => Some(txn),
            _ => None,
        }
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Validate and add a transaction.
    ///
    /// Validation failures come back as `TrackerError::InvalidTransaction`
    /// listing every problem. Balance and budget warnings are put to
    /// `confirm`; see `AddOutcome` for how each answer ends.
    pub fn add(
        &mut self,
        input: &TransactionInput,
        today: NaiveDate,
        confirm: &mut dyn Confirm,
    ) -> TrackerResult<AddOutcome> {
        let valid = input.validate(today).map_err(TrackerError::InvalidTransaction)?;

        if valid.kind == TransactionType::Expense {
            let savings = Summary::from_transactions(self.storage.transactions()).savings;
            if !check_sufficient_balance(valid.amount, savings) {
                let add_income_first = confirm.confirm(&ConfirmPrompt::InsufficientBalance {
                    savings,
                    amount: valid.amount,
                });
                info!(
                    amount = %valid.amount,
                    savings = %savings,
                    add_income_first,
                    "expense rejected: insufficient balance"
                );
                return Ok(AddOutcome::InsufficientBalance { add_income_first });
            }

            if let Some(category) = valid.category {
                if let Some(budget) = active_budget(self.storage.budgets(), category) {
                    let spent = spent_in_category(self.storage.transactions(), category);
                    if check_budget_overrun(valid.amount, spent, budget.amount) {
                        let category_name = self
                            .storage
                            .categories()
                            .iter()
                            .find(|c| c.id == category)
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "this category".to_string());

                        let proceed = confirm.confirm(&ConfirmPrompt::BudgetOverrun {
                            category: category_name,
                            spent,
                            budget: budget.amount,
                            amount: valid.amount,
                        });
                        if !proceed {
                            info!(category = %category, "expense declined: over budget");
                            return Ok(AddOutcome::DeclinedOverBudget);
                        }
                    }
                }
            }
        }

        let txn = valid.into_transaction();
        let mut next = self.storage.transactions().to_vec();
        next.push(txn.clone());
        self.storage.replace_transactions(next)?;

        self.storage.audit(
            AuditEntry::new(Action::Added, StorageKey::Transactions, txn.id.to_string())
                .label(&txn.description)
                .after(&txn),
        );
        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");

        Ok(AddOutcome::Added(txn))
    }

    /// All transactions in insertion order
    pub fn list(&self) -> &[Transaction] {
        self.storage.transactions()
    }

    /// Transactions matching `filter`, each with its backing index
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<FilteredTransaction<'_>> {
        filter_transactions(self.storage.transactions(), self.storage.categories(), filter)
    }

    /// Income, expense and savings totals across every transaction
    pub fn summary(&self) -> Summary {
        Summary::from_transactions(self.storage.transactions())
    }

    /// Resolve a transaction reference to its position.
    ///
    /// Accepts the full id, the `txn-xxxxxxxx` short form shown in lists, or
    /// any unambiguous id prefix.
    pub fn position_of(&self, reference: &str) -> TrackerResult<usize> {
        let needle = reference.trim().trim_start_matches("txn-").to_lowercase();
        if needle.is_empty() {
            return Err(TrackerError::transaction_not_found(reference));
        }

        let matches: Vec<usize> = self
            .storage
            .transactions()
            .iter()
            .enumerate()
            .filter(|(_, txn)| txn.id.to_full_string().starts_with(&needle))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [index] => Ok(*index),
            [] => Err(TrackerError::transaction_not_found(reference)),
            _ => Err(TrackerError::Validation(format!(
                "Transaction reference '{}' is ambiguous ({} matches)",
                reference,
                matches.len()
            ))),
        }
    }

    /// Position of the transaction with this exact id
    pub fn position_of_id(&self, id: TransactionId) -> Option<usize> {
        self.storage.transactions().iter().position(|t| t.id == id)
    }

    /// Delete the transaction at `index` of the full collection
    pub fn delete_at(&mut self, index: usize) -> TrackerResult<Transaction> {
        let mut next = self.storage.transactions().to_vec();
        if index >= next.len() {
            return Err(TrackerError::transaction_not_found(format!("#{}", index)));
        }

        let removed = next.remove(index);
        self.storage.replace_transactions(next)?;

        self.storage.audit(
            AuditEntry::new(Action::Removed, StorageKey::Transactions, removed.id.to_string())
                .label(&removed.description)
                .before(&removed),
        );
        info!(id = %removed.id, "transaction deleted");

        Ok(removed)
    }

    /// Delete the transaction a reference resolves to
    pub fn delete(&mut self, reference: &str) -> TrackerResult<Transaction> {
        let index = self.position_of(reference)?;
        self.delete_at(index)
    }

    /// Replace the description of the transaction at `index`.
    ///
    /// A blank description leaves the transaction untouched and returns
    /// `None`.
    pub fn update_description_at(
        &mut self,
        index: usize,
        description: &str,
    ) -> TrackerResult<Option<Transaction>> {
        if description.trim().is_empty() {
            return Ok(None);
        }
        validate_description(description)
            .map_err(|e| TrackerError::InvalidTransaction(ValidationErrors(vec![e])))?;

        let mut next = self.storage.transactions().to_vec();
        let Some(txn) = next.get_mut(index) else {
            return Err(TrackerError::transaction_not_found(format!("#{}", index)));
        };

        let before = txn.clone();
        txn.description = description.trim().to_string();
        let after = txn.clone();

        if before.description == after.description {
            return Ok(Some(after));
        }

        self.storage.replace_transactions(next)?;

        self.storage.audit(
            AuditEntry::new(Action::Edited, StorageKey::Transactions, after.id.to_string())
                .label(&after.description)
                .before(&before)
                .after(&after),
        );
        info!(id = %after.id, "transaction description updated");

        Ok(Some(after))
    }

    /// Replace the description of the transaction a reference resolves to
    pub fn update_description(
        &mut self,
        reference: &str,
        description: &str,
    ) -> TrackerResult<Option<Transaction>> {
        let index = self.position_of(reference)?;
        self.update_description_at(index, description)
    }
}
