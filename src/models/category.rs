//! Category model and the default category set
//!
//! Categories are flat labels used to group transactions and budgets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Longest allowed category name, in characters
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Name shown for transactions and budgets whose category no longer exists
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A user-defined label for grouping transactions and budgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_category_name(&self.name)
    }
}

/// Check a category name against the naming rules
pub fn validate_category_name(name: &str) -> Result<(), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LENGTH {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    Ok(())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolve a category id to its display name, "Uncategorized" if unknown
pub fn category_name(categories: &[Category], id: Option<CategoryId>) -> &str {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

/// Categories seeded into an empty category collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Food,
    Transportation,
    Entertainment,
    Bills,
    Shopping,
    Salary,
    Freelance,
    Investment,
}

impl DefaultCategory {
    /// Get all default categories in seed order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transportation,
            Self::Entertainment,
            Self::Bills,
            Self::Shopping,
            Self::Salary,
            Self::Freelance,
            Self::Investment,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
        }
    }

    /// Fixed id of the default (1-based seed position)
    pub fn id(&self) -> CategoryId {
        let position = Self::all()
            .iter()
            .position(|c| c == self)
            .unwrap_or_default();
        CategoryId::new(position as i64 + 1)
    }

    pub fn to_category(&self) -> Category {
        Category::new(self.id(), self.name())
    }
}

/// Build the full default category list
pub fn default_categories() -> Vec<Category> {
    DefaultCategory::all()
        .iter()
        .map(DefaultCategory::to_category)
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),
}
