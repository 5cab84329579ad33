//! Shared Store Module
//!
//! The cross-process atomic key/value capability the object cache mirrors
//! persistent groups into, plus an in-process implementation of it.

mod entry;
mod memory;
mod stats;

use serde_json::Value;

use crate::error::StoreResult;

// Re-export public types
pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Shared Store ==
/// Atomic operations over a flat string key space.
///
/// Implementations must make each call atomic with respect to every other
/// caller of the same store. There are no cross-key transactions. A `ttl`
/// of 0 means the value never expires.
pub trait SharedStore: Send + Sync {
    /// Returns true if a live value exists under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Returns the value under `key`, or None on a miss.
    fn fetch(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Unconditionally writes `value` under `key`.
    fn store(&self, key: &str, value: &Value, ttl: u64) -> StoreResult<bool>;

    /// Writes `value` only if `key` holds no live value. Returns false if it did.
    fn add(&self, key: &str, value: &Value, ttl: u64) -> StoreResult<bool>;

    /// Removes `key`. Returns false if it was absent.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Adds `amount` to the integer under `key` (a missing key counts as 0)
    /// and returns the new value, which may be negative.
    fn increment(&self, key: &str, amount: u64) -> StoreResult<i64>;

    /// Subtracts `amount` from the integer under `key` (a missing key counts
    /// as 0) and returns the new value, which may be negative.
    fn decrement(&self, key: &str, amount: u64) -> StoreResult<i64>;

    /// Drops every key in the store, including ones this cache did not write.
    fn clear_all(&self) -> StoreResult<()>;
}
