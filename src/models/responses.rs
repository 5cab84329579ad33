//! Response DTOs for the object cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::store::StoreStats;

/// Response body for add, set and replace
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    pub key: String,
    pub group: String,
    /// Whether the write took effect
    pub stored: bool,
}

/// Response body for GET /get/:group/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub group: String,
    pub found: bool,
    /// The cached value, null when not found
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, group: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            key: key.into(),
            group: group.into(),
            found: value.is_some(),
            value: value.unwrap_or(Value::Null),
        }
    }
}

/// Response body for DELETE /del/:group/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub group: String,
    pub deleted: bool,
}

/// Response body for incr and decr
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    pub key: String,
    pub group: String,
    /// The new counter value, null if the shared store failed
    pub value: Option<u64>,
}

/// Response body for POST /flush
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub flushed: bool,
}

/// Result of one batch operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpOutcome {
    Stored { stored: bool },
    Fetched { found: bool, value: Value },
    Deleted { deleted: bool },
    Counter { value: Option<u64> },
    Switched { site: u64 },
    Flushed { flushed: bool },
}

/// Response body for POST /batch, one outcome per operation in order
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub results: Vec<OpOutcome>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Shared-store fetches that hit
    pub hits: u64,
    /// Shared-store fetches that missed
    pub misses: u64,
    /// Entries dropped after their TTL
    pub expirations: u64,
    /// Current number of entries in the shared store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
