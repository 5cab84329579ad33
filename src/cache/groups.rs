//! Group Classification Module
//!
//! Tracks which groups are global (shared by all tenants) and which are
//! non-persistent (never mirrored to the shared store).

use std::collections::HashSet;

/// Group used when the caller passes an empty group name.
pub const DEFAULT_GROUP: &str = "default";

/// Resolves an empty group name to [`DEFAULT_GROUP`].
pub fn resolve_group(group: &str) -> &str {
    if group.is_empty() {
        DEFAULT_GROUP
    } else {
        group
    }
}

// == Group Names ==
/// One group name or a collection of them.
pub trait GroupNames {
    fn into_group_names(self) -> Vec<String>;
}

impl GroupNames for &str {
    fn into_group_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl GroupNames for String {
    fn into_group_names(self) -> Vec<String> {
        vec![self]
    }
}

impl<T: Into<String>> GroupNames for Vec<T> {
    fn into_group_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<String>, const N: usize> GroupNames for [T; N] {
    fn into_group_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: AsRef<str>> GroupNames for &[T] {
    fn into_group_names(self) -> Vec<String> {
        self.iter().map(|group| group.as_ref().to_string()).collect()
    }
}

// == Group Registry ==
/// Additive membership tables. There is no way to unregister a group.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    global: HashSet<String>,
    non_persistent: HashSet<String>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_global(&mut self, groups: impl GroupNames) {
        self.global.extend(groups.into_group_names());
    }

    pub fn add_non_persistent(&mut self, groups: impl GroupNames) {
        self.non_persistent.extend(groups.into_group_names());
    }

    pub fn is_global(&self, group: &str) -> bool {
        self.global.contains(group)
    }

    pub fn is_persistent(&self, group: &str) -> bool {
        !self.non_persistent.contains(group)
    }
}
