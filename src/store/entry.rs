//! Stored Entry Module
//!
//! A value held by the in-process shared store, with optional expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Stored Entry ==
/// A single shared-store entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored value
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry. A `ttl_seconds` of 0 means the entry never expires.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        let expires_at = (ttl_seconds > 0).then(|| now.saturating_add(ttl_seconds.saturating_mul(1000)));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub(crate) fn is_expired_at(&self, now_ms: u64) -> bool {
        matches!(self.expires_at, Some(expires) if now_ms >= expires)
    }

    // == Integer View ==
    /// Returns the value as a signed counter, if it is an integer.
    pub fn as_counter(&self) -> Option<i64> {
        self.value.as_i64()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
