//! Budget service
//!
//! Budgets are created and deleted, never edited. More than one budget may
//! target the same category; overrun checks use the first.

use tracing::info;

use crate::audit::{Action, AuditEntry};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{category_name, Budget, BudgetPeriod, CategoryId, Money};
use crate::storage::{Storage, StorageKey};

use super::query::{budget_statuses, BudgetStatus};
use super::validation::validate_amount;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a mut Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create a budget for an existing category
    pub fn create(
        &mut self,
        category: CategoryId,
        amount: Money,
        period: BudgetPeriod,
    ) -> TrackerResult<Budget> {
        if !self.storage.categories().iter().any(|c| c.id == category) {
            return Err(TrackerError::category_not_found(category.to_string()));
        }
        validate_amount(amount.to_f64()).map_err(|e| TrackerError::Validation(e.to_string()))?;

        let budget = Budget::new(category, amount, period);
        let mut next = self.storage.budgets().to_vec();
        next.push(budget.clone());
        let index = next.len() - 1;
        self.storage.replace_budgets(next)?;

        let name = category_name(self.storage.categories(), Some(category));
        self.storage.audit(
            AuditEntry::new(Action::Added, StorageKey::Budgets, index.to_string())
                .label(name)
                .after(&budget),
        );
        info!(category = %category, amount = %amount, period = %period, "budget created");

        Ok(budget)
    }

    /// All budgets in insertion order
    pub fn list(&self) -> &[Budget] {
        self.storage.budgets()
    }

    /// Spending status of every budget
    pub fn statuses(&self) -> Vec<BudgetStatus> {
        budget_statuses(
            self.storage.budgets(),
            self.storage.transactions(),
            self.storage.categories(),
        )
    }

    /// Delete the budget at `index` of the full collection
    pub fn delete_at(&mut self, index: usize) -> TrackerResult<Budget> {
        let mut next = self.storage.budgets().to_vec();
        if index >= next.len() {
            return Err(TrackerError::budget_not_found(format!("#{}", index)));
        }

        let removed = next.remove(index);
        self.storage.replace_budgets(next)?;

        let name = category_name(self.storage.categories(), Some(removed.category));
        self.storage.audit(
            AuditEntry::new(Action::Removed, StorageKey::Budgets, index.to_string())
                .label(name)
                .before(&removed),
        );
        info!(category = %removed.category, "budget deleted");

        Ok(removed)
    }
}
