//! Memory Store Module
//!
//! In-process shared store: a mutex-guarded HashMap with TTL expiry and a
//! fixed entry capacity. One instance is shared by every cache engine in the
//! process, the way an opcode-level user cache is shared by every request.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::entry::current_timestamp_ms;
use crate::store::{SharedStore, StoreStats, StoredEntry};

// == Memory Store ==
/// Thread-safe in-process implementation of [`SharedStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, StoredEntry>,
    stats: StoreStats,
}

impl Inner {
    /// Drops `key` if its TTL has elapsed. Returns true if a live entry remains.
    fn retain_live(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn purge_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Makes sure `key` can be written without exceeding `max_entries`.
    fn ensure_room(&mut self, key: &str, max_entries: usize) -> StoreResult<()> {
        if self.entries.contains_key(key) || self.entries.len() < max_entries {
            return Ok(());
        }
        self.purge_expired();
        if self.entries.len() < max_entries {
            Ok(())
        } else {
            Err(StoreError::Full(format!(
                "capacity of {} entries reached",
                max_entries
            )))
        }
    }

    fn insert(&mut self, key: &str, entry: StoredEntry) {
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Applies `op` to the counter under `key`, keeping the entry's expiry.
    fn adjust(
        &mut self,
        key: &str,
        amount: u64,
        max_entries: usize,
        op: fn(i64, i64) -> i64,
    ) -> StoreResult<i64> {
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);

        if self.retain_live(key) {
            let entry = self
                .entries
                .get_mut(key)
                .ok_or_else(|| StoreError::Unavailable(format!("entry vanished: {}", key)))?;
            let current = entry
                .as_counter()
                .ok_or_else(|| StoreError::NotNumeric(key.to_string()))?;
            let next = op(current, amount);
            entry.value = Value::from(next);
            return Ok(next);
        }

        self.ensure_room(key, max_entries)?;
        let next = op(0, amount);
        self.insert(key, StoredEntry::new(Value::from(next), 0));
        Ok(next)
    }
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_entries,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    /// Returns the number of entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// True when no new key can be created, even after purging expired
    /// entries.
    pub fn is_full(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.entries.len() < self.max_entries {
            return false;
        }
        inner.purge_expired();
        inner.entries.len() >= self.max_entries
    }
}

impl SharedStore for MemoryStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.inner.lock().retain_live(key))
    }

    fn fetch(&self, key: &str) -> StoreResult<Option<Value>> {
        let mut inner = self.inner.lock();
        if inner.retain_live(key) {
            inner.stats.record_hit();
            Ok(inner.entries.get(key).map(|entry| entry.value.clone()))
        } else {
            inner.stats.record_miss();
            Ok(None)
        }
    }

    fn store(&self, key: &str, value: &Value, ttl: u64) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        inner.retain_live(key);
        inner.ensure_room(key, self.max_entries)?;
        inner.insert(key, StoredEntry::new(value.clone(), ttl));
        Ok(true)
    }

    fn add(&self, key: &str, value: &Value, ttl: u64) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        if inner.retain_live(key) {
            return Ok(false);
        }
        inner.ensure_room(key, self.max_entries)?;
        inner.insert(key, StoredEntry::new(value.clone(), ttl));
        Ok(true)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        let live = inner.retain_live(key);
        if live {
            inner.entries.remove(key);
            let len = inner.entries.len();
            inner.stats.set_total_entries(len);
        }
        Ok(live)
    }

    fn increment(&self, key: &str, amount: u64) -> StoreResult<i64> {
        self.inner
            .lock()
            .adjust(key, amount, self.max_entries, i64::saturating_add)
    }

    fn decrement(&self, key: &str, amount: u64) -> StoreResult<i64> {
        self.inner
            .lock()
            .adjust(key, amount, self.max_entries, i64::saturating_sub)
    }

    fn clear_all(&self) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.stats.set_total_entries(0);
        debug!("Shared store cleared: {} entries dropped", dropped);
        Ok(())
    }
}
