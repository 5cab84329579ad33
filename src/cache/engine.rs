//! Cache Engine Module
//!
//! Two-tier object cache: a request-local map in front of a shared store.
//! Every operation resolves the group, namespaces the key, consults the
//! local cache and, unless the group is non-persistent, mirrors itself to
//! the shared store.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::groups::{resolve_group, GroupNames, GroupRegistry};
use crate::cache::{KeyNamer, LocalCache, LocalStats};
use crate::error::StoreResult;
use crate::store::SharedStore;

/// Predicate telling `add` that new entries are currently unwelcome.
pub type AdditionGuard = Box<dyn Fn() -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Up,
    Down,
}

impl Step {
    fn apply(self, current: i64, amount: i64) -> i64 {
        match self {
            Step::Up => current.saturating_add(amount),
            Step::Down => current.saturating_sub(amount),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Step::Up => "increment",
            Step::Down => "decrement",
        }
    }
}

/// Logs a failed shared-store call and turns it into `None`.
fn settle<T>(operation: &str, key: &str, result: StoreResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Shared store {} failed for {}: {}", operation, key, err);
            None
        }
    }
}

// == Object Cache ==
/// The cache engine. One instance per request; dropping it discards the
/// local cache while the shared store keeps everything persistent.
///
/// Values are cloned into the local cache, into the shared store and back
/// out to callers, so no caller ever holds a reference into cache state.
pub struct ObjectCache {
    store: Arc<dyn SharedStore>,
    namer: KeyNamer,
    tenant: String,
    local: LocalCache,
    groups: GroupRegistry,
    additions_suspended: AdditionGuard,
}

impl fmt::Debug for ObjectCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("namer", &self.namer)
            .field("tenant", &self.tenant)
            .field("local", &self.local)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl ObjectCache {
    // == Constructor ==
    /// Creates an engine with an empty local cache.
    ///
    /// # Arguments
    /// * `store` - The shared store persistent groups are mirrored to
    /// * `prefix` - Installation prefix placed in front of every key
    /// * `multisite` - Whether tenant-scoped groups carry the tenant in their keys
    /// * `tenant` - The initial tenant; ignored unless `multisite` is set
    pub fn new(
        store: Arc<dyn SharedStore>,
        prefix: impl Into<String>,
        multisite: bool,
        tenant: impl fmt::Display,
    ) -> Self {
        let mut cache = Self {
            store,
            namer: KeyNamer::new(prefix, multisite),
            tenant: String::new(),
            local: LocalCache::new(),
            groups: GroupRegistry::new(),
            additions_suspended: Box::new(|| false),
        };
        cache.switch_tenant(tenant);
        cache
    }

    /// Installs the predicate consulted before every `add`.
    pub fn with_addition_guard(mut self, guard: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.additions_suspended = Box::new(guard);
        self
    }

    /// Returns the resolved group and the namespaced key.
    fn locate(&self, key: impl fmt::Display, group: &str) -> (String, String) {
        let group = resolve_group(group).to_string();
        let key = self.namer.namespaced_key(
            &self.tenant,
            &group,
            &key.to_string(),
            self.groups.is_global(&group),
        );
        (group, key)
    }

    // == Add ==
    /// Stores `data` only if the key exists neither locally nor, for
    /// persistent groups, in the shared store.
    ///
    /// Returns false without side effects when additions are suspended, the
    /// key already exists, or the shared store refuses the write.
    pub fn add(&mut self, key: impl fmt::Display, data: &Value, group: &str, expire: u64) -> bool {
        let (group, key) = self.locate(key, group);

        if (self.additions_suspended)() {
            debug!("Add of {} skipped: additions suspended", key);
            return false;
        }
        if self.local.contains(&group, &key) {
            return false;
        }

        if self.groups.is_persistent(&group) {
            if settle("exists", &key, self.store.exists(&key)) != Some(false) {
                return false;
            }
            if settle("add", &key, self.store.add(&key, data, expire)) != Some(true) {
                return false;
            }
        }

        self.local.insert(&group, &key, data.clone());
        true
    }

    // == Set ==
    /// Unconditionally stores `data`. Returns false only if the shared store
    /// write fails, in which case the local cache is left untouched.
    pub fn set(&mut self, key: impl fmt::Display, data: &Value, group: &str, expire: u64) -> bool {
        let (group, key) = self.locate(key, group);

        if self.groups.is_persistent(&group)
            && settle("store", &key, self.store.store(&key, data, expire)) != Some(true)
        {
            return false;
        }

        self.local.insert(&group, &key, data.clone());
        true
    }

    // == Replace ==
    /// Overwrites an existing key. Never creates one.
    pub fn replace(
        &mut self,
        key: impl fmt::Display,
        data: &Value,
        group: &str,
        expire: u64,
    ) -> bool {
        let (group, key) = self.locate(key, group);
        let persistent = self.groups.is_persistent(&group);

        if !self.local.contains(&group, &key)
            && (!persistent || settle("exists", &key, self.store.exists(&key)) != Some(true))
        {
            return false;
        }

        if persistent && settle("store", &key, self.store.store(&key, data, expire)) != Some(true)
        {
            return false;
        }

        self.local.insert(&group, &key, data.clone());
        true
    }

    // == Get ==
    /// Returns a copy of the value, or None if it is not cached.
    ///
    /// `force` skips the local cache and refreshes it from the shared store.
    /// Non-persistent groups have no shared copy, so a forced read of one
    /// always misses.
    pub fn get(&mut self, key: impl fmt::Display, group: &str, force: bool) -> Option<Value> {
        let (group, key) = self.locate(key, group);
        let persistent = self.groups.is_persistent(&group);

        if !force {
            if let Some(value) = self.local.get(&group, &key) {
                return Some(value);
            }
        }
        if !persistent {
            return None;
        }

        let value = settle("fetch", &key, self.store.fetch(&key)).flatten()?;
        if force {
            self.local.insert(&group, &key, value.clone());
        }
        Some(value)
    }

    // == Delete ==
    /// Removes the key. For persistent groups the result is whether the
    /// shared store held it; non-persistent deletes always succeed.
    pub fn delete(&mut self, key: impl fmt::Display, group: &str) -> bool {
        let (group, key) = self.locate(key, group);

        self.local.remove(&group, &key);
        if self.groups.is_persistent(&group) {
            settle("delete", &key, self.store.delete(&key)).unwrap_or(false)
        } else {
            true
        }
    }

    // == Increment ==
    /// Adds `offset` to the counter, never going below zero. A negative
    /// offset decrements by its magnitude.
    ///
    /// Returns None if the shared store call fails or the cached value is
    /// not an integer.
    pub fn increment(&mut self, key: impl fmt::Display, offset: i64, group: &str) -> Option<u64> {
        if offset < 0 {
            self.step(key, offset.unsigned_abs(), group, Step::Down)
        } else {
            self.step(key, offset.unsigned_abs(), group, Step::Up)
        }
    }

    // == Decrement ==
    /// Subtracts `offset` from the counter, clamping at zero. A negative
    /// offset increments by its magnitude.
    pub fn decrement(&mut self, key: impl fmt::Display, offset: i64, group: &str) -> Option<u64> {
        if offset < 0 {
            self.step(key, offset.unsigned_abs(), group, Step::Up)
        } else {
            self.step(key, offset.unsigned_abs(), group, Step::Down)
        }
    }

    fn step(&mut self, key: impl fmt::Display, amount: u64, group: &str, step: Step) -> Option<u64> {
        let (group, key) = self.locate(key, group);

        let next = if self.groups.is_persistent(&group) {
            let result = match step {
                Step::Up => self.store.increment(&key, amount),
                Step::Down => self.store.decrement(&key, amount),
            };
            let value = settle(step.name(), &key, result)?;
            if value < 0 {
                // The store's own counter underflowed; floor it at zero
                settle("store", &key, self.store.store(&key, &Value::from(0), 0));
                0
            } else {
                value
            }
        } else {
            let amount = i64::try_from(amount).unwrap_or(i64::MAX);
            let Some(current) = self.local.counter(&group, &key) else {
                debug!("Counter {} skipped: cached value is not an integer", key);
                return None;
            };
            step.apply(current, amount).max(0)
        };

        self.local.insert(&group, &key, Value::from(next));
        u64::try_from(next).ok()
    }

    // == Flush ==
    /// Empties the local cache and clears the entire shared store.
    ///
    /// This also drops keys of other installations sharing the store.
    pub fn flush(&mut self) -> bool {
        self.local.clear();
        settle("clear", "*", self.store.clear_all()).is_some()
    }

    /// Deprecated alias of [`ObjectCache::flush`].
    pub fn reset(&mut self) {
        self.flush();
    }

    /// Nothing to release; always succeeds.
    pub fn close(&self) -> bool {
        true
    }

    // == Group Registration ==
    /// Marks groups as shared by every tenant.
    pub fn register_global_groups(&mut self, groups: impl GroupNames) {
        self.groups.add_global(groups);
    }

    /// Marks groups as local-only.
    pub fn register_non_persistent_groups(&mut self, groups: impl GroupNames) {
        self.groups.add_non_persistent(groups);
    }

    // == Tenant ==
    /// Points subsequent operations at another tenant. Entries cached for the
    /// previous tenant stay in the local cache, just out of reach.
    pub fn switch_tenant(&mut self, tenant: impl fmt::Display) {
        self.tenant = if self.namer.is_multisite() {
            tenant.to_string()
        } else {
            String::new()
        };
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Entry counts of the local cache.
    pub fn stats(&self) -> LocalStats {
        self.local.stats()
    }
}
