//! Request DTOs for the object cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed logical key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

fn default_offset() -> i64 {
    1
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for add, set and replace
///
/// # Fields
/// - `key`: The logical cache key
/// - `value`: Any JSON value
/// - `group`: Group name, empty for "default"
/// - `ttl`: Seconds until the shared copy expires, 0 for never
/// - `site`: Site to act as, the configured default if absent
#[derive(Debug, Clone, Deserialize)]
pub struct WriteRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub ttl: u64,
    #[serde(default)]
    pub site: Option<u64>,
}

impl WriteRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for incr and decr
#[derive(Debug, Clone, Deserialize)]
pub struct CounterRequest {
    pub key: String,
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub site: Option<u64>,
}

impl CounterRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Query string for single-key reads and deletes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub site: Option<u64>,
    #[serde(default)]
    pub force: bool,
}

/// One operation inside a batch
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchOp {
    Add {
        key: String,
        value: Value,
        #[serde(default)]
        group: String,
        #[serde(default)]
        ttl: u64,
    },
    Set {
        key: String,
        value: Value,
        #[serde(default)]
        group: String,
        #[serde(default)]
        ttl: u64,
    },
    Replace {
        key: String,
        value: Value,
        #[serde(default)]
        group: String,
        #[serde(default)]
        ttl: u64,
    },
    Get {
        key: String,
        #[serde(default)]
        group: String,
        #[serde(default)]
        force: bool,
    },
    Delete {
        key: String,
        #[serde(default)]
        group: String,
    },
    Incr {
        key: String,
        #[serde(default = "default_offset")]
        offset: i64,
        #[serde(default)]
        group: String,
    },
    Decr {
        key: String,
        #[serde(default = "default_offset")]
        offset: i64,
        #[serde(default)]
        group: String,
    },
    SwitchSite {
        site: u64,
    },
    Flush,
}

impl BatchOp {
    pub fn validate(&self) -> Option<String> {
        match self {
            BatchOp::Add { key, .. }
            | BatchOp::Set { key, .. }
            | BatchOp::Replace { key, .. }
            | BatchOp::Get { key, .. }
            | BatchOp::Delete { key, .. }
            | BatchOp::Incr { key, .. }
            | BatchOp::Decr { key, .. } => validate_key(key),
            BatchOp::SwitchSite { .. } | BatchOp::Flush => None,
        }
    }
}

/// Request body for POST /batch
///
/// All operations run against one engine, sharing one local cache.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub site: Option<u64>,
    pub ops: Vec<BatchOp>,
}
