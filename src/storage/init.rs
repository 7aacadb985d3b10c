//! Storage initialization
//!
//! Handles first-run setup and default data creation

use tracing::info;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::models::default_categories;

use super::Storage;

/// Prepare freshly loaded storage according to the user's settings
pub fn initialize_storage(storage: &mut Storage, settings: &Settings) -> TrackerResult<()> {
    if settings.seed_default_categories {
        seed_default_categories(storage)?;
    }
    Ok(())
}

/// Insert the default categories if the category collection is empty.
///
/// Returns whether anything was seeded.
pub fn seed_default_categories(storage: &mut Storage) -> TrackerResult<bool> {
    if !storage.categories().is_empty() {
        return Ok(false);
    }

    let defaults = default_categories();
    let count = defaults.len();
    storage.replace_categories(defaults)?;
    info!(count, "seeded default categories");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId};
    use crate::storage::MemoryStore;

    #[test]
    fn test_seeds_all_defaults_when_empty() {
        let mut storage = Storage::new(MemoryStore::new());
        storage.load_all();

        assert!(seed_default_categories(&mut storage).unwrap());

        let names: Vec<_> = storage.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Food",
                "Transportation",
                "Entertainment",
                "Bills",
                "Shopping",
                "Salary",
                "Freelance",
                "Investment"
            ]
        );
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let mut store = MemoryStore::new();
        store.set_raw("categories", r#"[{"id": 42, "name": "Custom"}]"#);
        let mut storage = Storage::new(store);
        storage.load_all();

        assert!(!seed_default_categories(&mut storage).unwrap());
        assert_eq!(
            storage.categories(),
            &[Category::new(CategoryId::new(42), "Custom")]
        );
    }

    #[test]
    fn test_settings_can_disable_seeding() {
        let mut storage = Storage::new(MemoryStore::new());
        storage.load_all();

        let settings = Settings {
            seed_default_categories: false,
            ..Settings::default()
        };
        initialize_storage(&mut storage, &settings).unwrap();
        assert!(storage.categories().is_empty());
    }
}
