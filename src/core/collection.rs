//! Ordered, de-duplicated key → value accumulator.
//!
//! Every operation takes the collection by value and returns the resulting
//! collection, so a value that has been extended can no longer be observed by
//! the code that handed it over. Cloning is explicit when a caller needs to
//! keep the previous state around (e.g. `extracted` and `existing` passed to
//! post-processors next to the draft).

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which value survives when both sides of a merge contain the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The receiver's value wins (first write wins).
    #[default]
    KeepExisting,
    /// The other collection's value wins.
    PreferIncoming,
}

/// Translation keys and their values, in insertion order.
///
/// Keys are never empty: adding an empty key leaves the collection unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCollection {
    values: IndexMap<String, String>,
}

impl TranslationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from existing key/value pairs, dropping empty keys.
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        values
            .into_iter()
            .fold(Self::new(), |collection, (key, value)| {
                collection.add_with_value(key, value)
            })
    }

    /// Add a key whose value is the key itself.
    pub fn add(self, key: impl Into<String>) -> Self {
        let key = key.into();
        let value = key.clone();
        self.add_with_value(key, value)
    }

    /// Add a key with an explicit value, updating the value in place if the
    /// key is already present.
    pub fn add_with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.values.insert(key, value.into());
        }
        self
    }

    pub fn add_keys<I, K>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        keys.into_iter().fold(self, |collection, key| collection.add(key))
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.values.shift_remove(key);
        self
    }

    /// Keep only the entries for which `predicate(key, value)` holds.
    pub fn filter<F>(mut self, mut predicate: F) -> Self
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.values
            .retain(|key, value| predicate(key.as_str(), value.as_str()));
        self
    }

    /// Replace every value with `f(key, value)`.
    pub fn map_values<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&str, &str) -> String,
    {
        for (key, value) in self.values.iter_mut() {
            *value = f(key.as_str(), value.as_str());
        }
        self
    }

    /// Merge `other` into this collection; existing values win.
    pub fn union(self, other: &TranslationCollection) -> Self {
        self.union_with(other, MergePolicy::KeepExisting)
    }

    /// Merge `other` into this collection. Keys only present in `other` are
    /// appended in `other`'s order; colliding keys keep their position and
    /// take the value chosen by `policy`.
    pub fn union_with(mut self, other: &TranslationCollection, policy: MergePolicy) -> Self {
        for (key, value) in &other.values {
            match self.values.get_mut(key) {
                Some(existing) => {
                    if policy == MergePolicy::PreferIncoming {
                        existing.clone_from(value);
                    }
                }
                None => {
                    self.values.insert(key.clone(), value.clone());
                }
            }
        }
        self
    }

    /// Keep only the keys that are also present in `other`.
    pub fn intersect(self, other: &TranslationCollection) -> Self {
        self.filter(|key, _| other.has(key))
    }

    /// Reorder entries by comparing keys.
    pub fn sort_by<F>(mut self, mut compare: F) -> Self
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.values
            .sort_by(|a, _, b, _| compare(a.as_str(), b.as_str()));
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for TranslationCollection {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::new().add_keys(keys)
    }
}

impl IntoIterator for TranslationCollection {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
