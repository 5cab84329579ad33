//! Local Cache Module
//!
//! Request-lifetime map from group to namespaced key to value.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

// == Local Cache ==
/// Values this engine has written or force-fetched during its lifetime.
///
/// Values go in and come out as clones, so callers never share a tree with
/// the cache.
#[derive(Debug, Default)]
pub struct LocalCache {
    groups: HashMap<String, HashMap<String, Value>>,
}

/// Entry counts of a [`LocalCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalStats {
    /// Number of entries per group
    pub groups: HashMap<String, usize>,
    /// Total entries across groups
    pub total_entries: usize,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, group: &str, key: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Returns a copy of the cached value.
    pub fn get(&self, group: &str, key: &str) -> Option<Value> {
        self.groups.get(group)?.get(key).cloned()
    }

    /// Reads the entry as a counter. An absent entry counts as 0; a
    /// non-integer one yields None.
    pub fn counter(&self, group: &str, key: &str) -> Option<i64> {
        match self.groups.get(group).and_then(|entries| entries.get(key)) {
            Some(value) => value.as_i64(),
            None => Some(0),
        }
    }

    pub fn insert(&mut self, group: &str, key: &str, value: Value) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn remove(&mut self, group: &str, key: &str) -> Option<Value> {
        self.groups.get_mut(group)?.remove(key)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> LocalStats {
        let groups: HashMap<String, usize> = self
            .groups
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(group, entries)| (group.clone(), entries.len()))
            .collect();
        let total_entries = groups.values().sum();

        LocalStats {
            groups,
            total_entries,
        }
    }
}
