//! One line of the audit log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::StorageKey;

/// What happened to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Edited,
    Removed,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Edited => "edited",
            Self::Removed => "removed",
        }
    }
}

/// A change to one record of one collection.
///
/// `reference` is what the CLI shows for the record: the `txn-` short id
/// for transactions, the id for categories, the list position for budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: Action,
    pub collection: StorageKey,
    pub reference: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

impl AuditEntry {
    pub fn new(action: Action, collection: StorageKey, reference: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            action,
            collection,
            reference: reference.into(),
            label: None,
            before: None,
            after: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Record as stored before the change
    pub fn before<T: Serialize>(mut self, record: &T) -> Self {
        self.before = serde_json::to_value(record).ok();
        self
    }

    /// Record as stored after the change
    pub fn after<T: Serialize>(mut self, record: &T) -> Self {
        self.after = serde_json::to_value(record).ok();
        self
    }

    /// Fields whose stored value differs between `before` and `after`,
    /// as `field: old -> new`
    pub fn changes(&self) -> Vec<String> {
        let (Some(Value::Object(before)), Some(Value::Object(after))) = (&self.before, &self.after)
        else {
            return Vec::new();
        };

        after
            .iter()
            .filter_map(|(field, new)| {
                let old = before.get(field).unwrap_or(&Value::Null);
                (old != new).then(|| format!("{}: {} -> {}", field, old, new))
            })
            .collect()
    }

    /// One line per entry, followed by an indented line per changed field
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}  {:<7} {:<12} {}",
            self.at.format("%Y-%m-%d %H:%M"),
            self.action.as_str(),
            self.collection.as_str(),
            self.reference
        );
        if let Some(label) = &self.label {
            line.push_str(&format!("  \"{}\"", label));
        }
        for change in self.changes() {
            line.push_str("\n    ");
            line.push_str(&change);
        }
        line
    }
}
