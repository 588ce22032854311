//! Flat string-keyed fact records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical field name to string value.
///
/// Numeric facts are stored as decimal text: consumers of the JSON snapshot
/// expect string-typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactRecord(BTreeMap<String, String>);

impl FactRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fact, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Fact text
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Fact parsed as an unsigned decimal number
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|value| value.parse().ok())
    }

    /// Whether the fact is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record holds no fact
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over facts in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for FactRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
