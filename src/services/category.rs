//! Category service
//!
//! Categories are created and deleted, never renamed. Deleting one leaves
//! transactions and budgets that reference it alone; they show up as
//! "Uncategorized" afterwards.

use tracing::info;

use crate::audit::{Action, AuditEntry};
use crate::error::{TrackerError, TrackerResult};
use crate::models::category::validate_category_name;
use crate::models::{Category, CategoryId};
use crate::storage::{seed_default_categories, Storage, StorageKey};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create a category with a fresh id.
    ///
    /// Names are not required to be unique.
    pub fn create(&mut self, name: &str) -> TrackerResult<Category> {
        validate_category_name(name).map_err(|e| TrackerError::Validation(e.to_string()))?;

        let id = CategoryId::next_after(self.storage.categories().iter().map(|c| c.id));
        let category = Category::new(id, name.trim());

        let mut next = self.storage.categories().to_vec();
        next.push(category.clone());
        self.storage.replace_categories(next)?;

        self.storage.audit(
            AuditEntry::new(Action::Added, StorageKey::Categories, category.id.to_string())
                .label(&category.name)
                .after(&category),
        );
        info!(id = %category.id, name = %category.name, "category created");

        Ok(category)
    }

    /// All categories in insertion order
    pub fn list(&self) -> &[Category] {
        self.storage.categories()
    }

    /// Find a category by name (case-insensitive) or by id
    pub fn find(&self, identifier: &str) -> Option<&Category> {
        let identifier = identifier.trim();
        let categories = self.storage.categories();

        if let Some(category) = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(identifier))
        {
            return Some(category);
        }

        let id = identifier.parse::<CategoryId>().ok()?;
        categories.iter().find(|c| c.id == id)
    }

    /// Delete the category at `index` of the full collection
    pub fn delete_at(&mut self, index: usize) -> TrackerResult<Category> {
        let mut next = self.storage.categories().to_vec();
        if index >= next.len() {
            return Err(TrackerError::category_not_found(format!("#{}", index)));
        }

        let removed = next.remove(index);
        self.storage.replace_categories(next)?;

        self.storage.audit(
            AuditEntry::new(Action::Removed, StorageKey::Categories, removed.id.to_string())
                .label(&removed.name)
                .before(&removed),
        );
        info!(id = %removed.id, name = %removed.name, "category deleted");

        Ok(removed)
    }

    /// Seed the default categories if there are none
    pub fn seed_defaults(&mut self) -> TrackerResult<bool> {
        seed_default_categories(self.storage)
    }
}
