//! Object Cache - a request-scoped object cache over a shared store
//!
//! Provides a local read-through/write-through buffer in front of a shared
//! atomic key/value store, with group classification and per-site key spaces.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::ObjectCache;
pub use config::Config;
pub use store::{MemoryStore, SharedStore};
pub use tasks::spawn_cleanup_task;
