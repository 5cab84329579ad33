//! Key Namer Module
//!
//! Maps (tenant, group, key) to the flat key used in the shared store.

// == Key Namer ==
/// Builds namespaced keys for one installation.
///
/// `prefix` separates installations that share one physical store. With
/// multisite enabled, keys of tenant-scoped groups also carry the tenant, so
/// two tenants only collide inside global groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNamer {
    prefix: String,
    multisite: bool,
}

impl KeyNamer {
    pub fn new(prefix: impl Into<String>, multisite: bool) -> Self {
        Self {
            prefix: prefix.into(),
            multisite,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_multisite(&self) -> bool {
        self.multisite
    }

    /// Returns `prefix.group.tenant:key` for tenant-scoped groups under
    /// multisite, `prefix.group.key` otherwise.
    pub fn namespaced_key(&self, tenant: &str, group: &str, key: &str, global: bool) -> String {
        if self.multisite && !global {
            format!("{}.{}.{}:{}", self.prefix, group, tenant, key)
        } else {
            format!("{}.{}.{}", self.prefix, group, key)
        }
    }
}
