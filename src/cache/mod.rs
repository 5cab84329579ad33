//! Cache Module
//!
//! The object cache engine and its building blocks: key namespacing, the
//! request-local cache and group classification.

mod engine;
mod groups;
mod key;
mod local;


// Re-export public types
pub use engine::{AdditionGuard, ObjectCache};
pub use groups::{resolve_group, GroupNames, GroupRegistry, DEFAULT_GROUP};
pub use key::KeyNamer;
pub use local::{LocalCache, LocalStats};
