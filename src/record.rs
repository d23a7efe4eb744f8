//! Keyed records built up by [`Completion::bind`](crate::Completion::bind).
//!
//! A record stores at most one value per key. Inserting an existing key
//! replaces its value and leaves every other field alone.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A keyed record with insert-or-overwrite semantics.
pub trait Record<K, V> {
    /// Store `value` under `key`, replacing any previous value for `key`.
    fn set(&mut self, key: K, value: V);
}

impl<K: Ord, V> Record<K, V> for BTreeMap<K, V> {
    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V, S> Record<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// JSON objects accept any field that converts into a [`serde_json::Value`],
/// so one record can hold strings, numbers and nested objects side by side.
#[cfg(feature = "json")]
impl<K, V> Record<K, V> for serde_json::Map<String, serde_json::Value>
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    fn set(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }
}
