//! Identifier types for categories and transactions
//!
//! Category ids are plain integers on the wire. Older data may hold the same
//! id as a string (`"7"`), so deserialization accepts either form and always
//! writes the integer back out.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Integer identifier of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Allocate an id for a new category.
    ///
    /// Uses the current time in milliseconds, bumped past the largest id
    /// already in use so two categories created in the same millisecond
    /// never collide.
    pub fn next_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = CategoryId>,
    {
        let now = Utc::now().timestamp_millis();
        let max_existing = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self(now.max(max_existing + 1))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid category id: {}", s))
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Any JSON shape a category id has been stored as
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategoryId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCategoryId {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    fn into_id(self) -> Result<CategoryId, String> {
        match self {
            Self::Int(id) => Ok(CategoryId(id)),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(CategoryId(f as i64)),
            Self::Float(f) => Err(format!("Invalid category id: {}", f)),
            Self::Text(s) => s.parse(),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawCategoryId::deserialize(deserializer)?
            .into_id()
            .map_err(de::Error::custom)
    }
}

/// Deserialize an optional category reference where `null` and `""` both
/// mean "no category".
pub fn deserialize_optional_category<'de, D>(
    deserializer: D,
) -> Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCategoryId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_blank() => Ok(None),
        Some(raw) => raw.into_id().map(Some).map_err(de::Error::custom),
    }
}

/// Stable identity of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Full hyphenated form, as written to storage
    pub fn to_full_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", &self.0.to_string()[..8])
    }
}

/// Deserialize a transaction id where `null` means "not assigned yet";
/// such records get a fresh id.
pub fn deserialize_transaction_id<'de, D>(deserializer: D) -> Result<TransactionId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TransactionId>::deserialize(deserializer)?.unwrap_or_default())
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("txn-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
