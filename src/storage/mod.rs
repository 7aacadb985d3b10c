//! Storage layer for the finance tracker
//!
//! `Storage` owns the three in-memory collections and the key-value store
//! they are persisted to. Every collection is written back whole under its
//! fixed key; the in-memory copy is only replaced once that write succeeded.

pub mod file_io;
pub mod init;
pub mod kv;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, seed_default_categories};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLog};
use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Category, Money, Transaction};

/// Fixed keys the collections are stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKey {
    Transactions,
    Categories,
    Budgets,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Categories => "categories",
            Self::Budgets => "budgets",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Transactions, Self::Categories, Self::Budgets]
    }
}

/// Application state: the collections plus where they are persisted
pub struct Storage {
    store: Box<dyn KeyValueStore>,
    audit: Option<AuditLog>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
}

impl Storage {
    /// Wrap a store; collections start empty until `load_all` is called
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            audit: None,
            transactions: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
        }
    }

    /// Open the on-disk store and audit log under `paths` and load everything
    pub fn open(paths: &TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        let mut storage = Self::new(JsonFileStore::new(paths.data_dir()))
            .with_audit(AuditLog::new(paths.audit_log()));
        storage.load_all();
        Ok(storage)
    }

    /// Record every mutation in the given audit log
    pub fn with_audit(mut self, log: AuditLog) -> Self {
        self.audit = Some(log);
        self
    }

    pub fn audit_log(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }

    /// Load all collections from the store.
    ///
    /// Missing keys load as empty collections. A value that cannot be read at
    /// all also loads as empty; individual records that fail to parse are
    /// skipped, and so are transactions and budgets whose amount is outside
    /// the allowed range. All of these are reported through `tracing`.
    pub fn load_all(&mut self) {
        let raw_transactions = fetch_records(self.store.as_ref(), StorageKey::Transactions);
        let missing_ids = raw_transactions
            .iter()
            .any(|item| item.get("id").map_or(true, Value::is_null));

        self.transactions = drop_invalid_amounts(
            StorageKey::Transactions,
            parse_records(StorageKey::Transactions, raw_transactions),
            |t: &Transaction| t.amount,
        );
        self.categories = parse_records(
            StorageKey::Categories,
            fetch_records(self.store.as_ref(), StorageKey::Categories),
        );
        self.budgets = drop_invalid_amounts(
            StorageKey::Budgets,
            parse_records(
                StorageKey::Budgets,
                fetch_records(self.store.as_ref(), StorageKey::Budgets),
            ),
            |b: &Budget| b.amount,
        );

        // Ids handed out to id-less records must survive the next load
        if missing_ids && !self.transactions.is_empty() {
            match persist(self.store.as_mut(), StorageKey::Transactions, &self.transactions) {
                Ok(()) => info!(
                    count = self.transactions.len(),
                    "assigned ids to stored transactions"
                ),
                Err(err) => warn!(error = %err, "could not persist assigned transaction ids"),
            }
        }

        debug!(
            transactions = self.transactions.len(),
            categories = self.categories.len(),
            budgets = self.budgets.len(),
            "loaded collections"
        );
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Persist `next` as the transaction collection, then adopt it
    pub(crate) fn replace_transactions(&mut self, next: Vec<Transaction>) -> TrackerResult<()> {
        persist(self.store.as_mut(), StorageKey::Transactions, &next)?;
        self.transactions = next;
        Ok(())
    }

    /// Persist `next` as the category collection, then adopt it
    pub(crate) fn replace_categories(&mut self, next: Vec<Category>) -> TrackerResult<()> {
        persist(self.store.as_mut(), StorageKey::Categories, &next)?;
        self.categories = next;
        Ok(())
    }

    /// Persist `next` as the budget collection, then adopt it
    pub(crate) fn replace_budgets(&mut self, next: Vec<Budget>) -> TrackerResult<()> {
        persist(self.store.as_mut(), StorageKey::Budgets, &next)?;
        self.budgets = next;
        Ok(())
    }

    /// Persist all three collections, then adopt them.
    ///
    /// Values are serialized before anything is written. If a write fails,
    /// the keys already written get their previous contents back and the
    /// in-memory collections are left as they were.
    pub(crate) fn replace_all(
        &mut self,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        budgets: Vec<Budget>,
    ) -> TrackerResult<()> {
        let staged = [
            (StorageKey::Categories, to_stored(StorageKey::Categories, &categories)?),
            (StorageKey::Budgets, to_stored(StorageKey::Budgets, &budgets)?),
            (StorageKey::Transactions, to_stored(StorageKey::Transactions, &transactions)?),
        ];
        let previous = [
            to_stored(StorageKey::Categories, &self.categories)?,
            to_stored(StorageKey::Budgets, &self.budgets)?,
            to_stored(StorageKey::Transactions, &self.transactions)?,
        ];

        for (written, (key, value)) in staged.iter().enumerate() {
            if let Err(err) = self.store.set(key.as_str(), value) {
                for ((key, _), old) in staged.iter().zip(&previous).take(written) {
                    if let Err(restore_err) = self.store.set(key.as_str(), old) {
                        warn!(key = key.as_str(), error = %restore_err, "could not restore collection");
                    }
                }
                return Err(err);
            }
        }

        self.transactions = transactions;
        self.categories = categories;
        self.budgets = budgets;
        Ok(())
    }

    /// Wipe the store and empty every collection
    pub(crate) fn clear_all(&mut self) -> TrackerResult<()> {
        self.store.clear()?;
        self.transactions.clear();
        self.categories.clear();
        self.budgets.clear();
        Ok(())
    }

    /// Append to the audit log, if there is one. A failing write is logged
    /// and never undoes the mutation it describes.
    pub(crate) fn audit(&self, entry: AuditEntry) {
        if let Some(log) = &self.audit {
            if let Err(err) = log.append(&entry) {
                warn!(error = %err, "failed to write audit entry");
            }
        }
    }
}

fn to_stored<T: Serialize>(key: StorageKey, items: &[T]) -> TrackerResult<Value> {
    serde_json::to_value(items)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize {}: {}", key.as_str(), e)))
}

fn persist<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: StorageKey,
    items: &[T],
) -> TrackerResult<()> {
    store.set(key.as_str(), &to_stored(key, items)?)
}

fn fetch_records(store: &dyn KeyValueStore, key: StorageKey) -> Vec<Value> {
    match store.get(key.as_str()) {
        Ok(None) | Ok(Some(Value::Null)) => Vec::new(),
        Ok(Some(Value::Array(items))) => items,
        Ok(Some(_)) => {
            warn!(key = key.as_str(), "stored value is not a list, starting empty");
            Vec::new()
        }
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "stored value unreadable, starting empty");
            Vec::new()
        }
    }
}

fn parse_records<T: DeserializeOwned>(key: StorageKey, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key = key.as_str(), index, error = %err, "skipping unreadable record");
                None
            }
        })
        .collect()
}

fn drop_invalid_amounts<T>(key: StorageKey, records: Vec<T>, amount: impl Fn(&T) -> Money) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let value = amount(&record);
            if value.is_valid_amount() {
                Some(record)
            } else {
                warn!(key = key.as_str(), index, amount = %value, "skipping record with out-of-range amount");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, CategoryId};
    use crate::storage::kv::FlakyStore;
    use tempfile::TempDir;

    fn memory_storage(setup: impl FnOnce(&mut MemoryStore)) -> Storage {
        let mut store = MemoryStore::new();
        setup(&mut store);
        let mut storage = Storage::new(store);
        storage.load_all();
        storage
    }

    #[test]
    fn test_empty_store_loads_empty_collections() {
        let storage = memory_storage(|_| {});
        assert!(storage.transactions().is_empty());
        assert!(storage.categories().is_empty());
        assert!(storage.budgets().is_empty());
    }

    #[test]
    fn test_corrupted_value_loads_as_empty() {
        let storage = memory_storage(|store| {
            store.set_raw("categories", "{{{ definitely not json");
            store.set_raw("budgets", r#"{"not": "a list"}"#);
        });
        assert!(storage.categories().is_empty());
        assert!(storage.budgets().is_empty());
    }

    #[test]
    fn test_unreadable_records_are_skipped() {
        let storage = memory_storage(|store| {
            store.set_raw(
                "categories",
                r#"[{"id": 1, "name": "Food"}, {"name": "no id"}, {"id": "2", "name": "Bills"}]"#,
            );
        });
        let names: Vec<_> = storage.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Bills"]);
    }

    #[test]
    fn test_missing_transaction_ids_are_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        std::fs::write(
            data_dir.join("transactions.json"),
            r#"[{"description": "Salary", "amount": 1000, "type": "income",
                 "category": null, "date": "2025-01-01",
                 "timestamp": "2025-01-01T09:00:00Z"}]"#,
        )
        .unwrap();

        let mut first = Storage::new(JsonFileStore::new(data_dir.clone()));
        first.load_all();
        let id = first.transactions()[0].id;

        let mut second = Storage::new(JsonFileStore::new(data_dir));
        second.load_all();
        assert_eq!(second.transactions()[0].id, id);
    }

    #[test]
    fn test_replace_persists_whole_collection() {
        let mut storage = memory_storage(|_| {});
        let budgets = vec![Budget::new(
            CategoryId::new(1),
            Money::from_units(200),
            BudgetPeriod::Monthly,
        )];
        storage.replace_budgets(budgets.clone()).unwrap();

        assert_eq!(storage.budgets(), budgets.as_slice());
        let value = storage.store.get("budgets").unwrap().unwrap();
        assert_eq!(value[0]["amount"], 200);
        assert_eq!(value[0]["period"], "monthly");
    }

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().join("tracker"));
        let storage = Storage::open(&paths).unwrap();

        assert!(paths.data_dir().exists());
        assert!(storage.audit_log().is_some());
    }

    #[test]
    fn test_out_of_range_amounts_are_skipped() {
        let storage = memory_storage(|store| {
            store.set_raw(
                "transactions",
                r#"[{"description": "Bonus", "amount": 50000000000000000, "type": "income",
                     "category": null, "date": "2025-01-01", "timestamp": "2025-01-01T09:00:00Z"},
                    {"description": "Bonus", "amount": 50000000000000000, "type": "income",
                     "category": null, "date": "2025-01-02", "timestamp": "2025-01-02T09:00:00Z"},
                    {"description": "Salary", "amount": 1000, "type": "income",
                     "category": null, "date": "2025-01-03", "timestamp": "2025-01-03T09:00:00Z"}]"#,
            );
            store.set_raw(
                "budgets",
                r#"[{"category": 1, "amount": 0, "period": "monthly"},
                    {"category": 2, "amount": 300, "period": "weekly"}]"#,
            );
        });

        assert_eq!(storage.transactions().len(), 1);
        assert_eq!(storage.transactions()[0].description, "Salary");
        assert_eq!(storage.budgets().len(), 1);
        assert_eq!(storage.budgets()[0].amount, Money::from_units(300));

        let summary = crate::services::Summary::from_transactions(storage.transactions());
        assert_eq!(summary.total_income, Money::from_units(1000));
    }

    #[test]
    fn test_null_transaction_id_is_assigned() {
        let store = FlakyStore::default();
        let handle = store.clone();
        let mut storage = Storage::new(store);
        handle.set_raw(
            "transactions",
            r#"[{"id": null, "description": "Salary", "amount": 1000, "type": "income",
                 "category": null, "date": "2025-01-01", "timestamp": "2025-01-01T09:00:00Z"}]"#,
        );
        storage.load_all();

        assert_eq!(storage.transactions().len(), 1);
        let id = storage.transactions()[0].id;
        let stored = handle.value("transactions").unwrap();
        assert!(!stored[0]["id"].is_null());

        storage.load_all();
        assert_eq!(storage.transactions()[0].id, id);
    }

    fn sample_collections() -> (Vec<Transaction>, Vec<Category>, Vec<Budget>) {
        let transactions = vec![Transaction::new(
            "Salary",
            Money::from_units(1000),
            crate::models::TransactionType::Income,
            None,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )];
        let categories = vec![Category::new(CategoryId::new(1), "Food")];
        let budgets = vec![Budget::new(
            CategoryId::new(1),
            Money::from_units(200),
            BudgetPeriod::Monthly,
        )];
        (transactions, categories, budgets)
    }

    #[test]
    fn test_replace_all_writes_every_collection() {
        let store = FlakyStore::default();
        let handle = store.clone();
        let mut storage = Storage::new(store);

        let (transactions, categories, budgets) = sample_collections();
        storage
            .replace_all(transactions.clone(), categories.clone(), budgets.clone())
            .unwrap();

        assert_eq!(storage.transactions(), transactions.as_slice());
        assert_eq!(storage.categories(), categories.as_slice());
        assert_eq!(storage.budgets(), budgets.as_slice());
        assert_eq!(handle.value("categories").unwrap()[0]["name"], "Food");
        assert_eq!(handle.value("transactions").unwrap()[0]["description"], "Salary");
    }

    #[test]
    fn test_replace_all_rolls_back_on_failed_write() {
        for failing in ["budgets", "transactions"] {
            let store = FlakyStore::default();
            let handle = store.clone();
            let mut storage = Storage::new(store);
            storage
                .replace_categories(vec![Category::new(CategoryId::new(7), "Rent")])
                .unwrap();

            handle.fail_writes_to(Some(failing));
            let (transactions, categories, budgets) = sample_collections();
            let result = storage.replace_all(transactions, categories, budgets);

            assert!(matches!(result, Err(TrackerError::Storage(_))));
            assert_eq!(storage.categories()[0].name, "Rent");
            assert!(storage.transactions().is_empty());
            assert!(storage.budgets().is_empty());
            assert_eq!(handle.value("categories").unwrap()[0]["name"], "Rent");
            assert!(handle.value("budgets").map_or(true, |v| v == serde_json::json!([])));
        }
    }
}
