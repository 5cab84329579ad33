//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Object cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Database host, first component of the key prefix
    pub db_host: String,
    /// Database name, second component of the key prefix
    pub db_name: String,
    /// Table prefix, last component of the key prefix
    pub table_prefix: String,
    /// Whether sites get disjoint key spaces
    pub multisite: bool,
    /// Site used when a request names none
    pub default_site: u64,
    /// Groups shared by all sites
    pub global_groups: Vec<String>,
    /// Groups kept out of the shared store
    pub non_persistent_groups: Vec<String>,
    /// Maximum number of entries the shared store can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DB_HOST` - Database host (default: localhost)
    /// - `DB_NAME` - Database name (default: wordpress)
    /// - `TABLE_PREFIX` - Table prefix (default: wp_)
    /// - `MULTISITE` - Enable per-site key spaces (default: false)
    /// - `DEFAULT_SITE` - Site id for requests without one (default: 1)
    /// - `GLOBAL_GROUPS` - Comma-separated global groups (default: none)
    /// - `NON_PERSISTENT_GROUPS` - Comma-separated local-only groups (default: none)
    /// - `MAX_ENTRIES` - Shared store capacity (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_host: env::var("DB_HOST").unwrap_or(defaults.db_host),
            db_name: env::var("DB_NAME").unwrap_or(defaults.db_name),
            table_prefix: env::var("TABLE_PREFIX").unwrap_or(defaults.table_prefix),
            multisite: env::var("MULTISITE")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.multisite),
            default_site: parse_var("DEFAULT_SITE", defaults.default_site),
            global_groups: env::var("GLOBAL_GROUPS")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.global_groups),
            non_persistent_groups: env::var("NON_PERSISTENT_GROUPS")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.non_persistent_groups),
            max_entries: parse_var("MAX_ENTRIES", defaults.max_entries),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Key prefix separating this installation from others on the same store.
    pub fn prefix(&self) -> String {
        format!("{}.{}.{}", self.db_host, self.db_name, self.table_prefix)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_name: "wordpress".to_string(),
            table_prefix: "wp_".to_string(),
            multisite: false,
            default_site: 1,
            global_groups: Vec::new(),
            non_persistent_groups: Vec::new(),
            max_entries: 10_000,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}
