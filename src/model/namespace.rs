use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A namespace that only its owners may publish under.
///
/// Keyed by the lowercased `value`. When `is_prefix` is set the namespace covers every
/// id starting with `value`; `is_shared` lets non-owners push into it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedNamespace {
    pub value: String,
    pub is_prefix: bool,
    pub is_shared: bool,
    pub owners: BTreeSet<String>,
}

impl ReservedNamespace {
    /// Whether `package_id` falls inside this namespace.
    pub fn covers(&self, package_id: &str) -> bool {
        let id = package_id.to_lowercase();
        if self.is_prefix {
            id.starts_with(&self.value)
        } else {
            id == self.value
        }
    }
}

/// Payload for reserving a namespace.
#[derive(Debug, Clone, Default)]
pub struct NamespaceCreate {
    pub value: String,
    pub is_prefix: bool,
    pub is_shared: bool,
    pub owners: Vec<String>,
}

impl NamespaceCreate {
    pub fn prefix(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_prefix: true,
            ..Self::default()
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceUpdate {
    pub is_shared: Option<bool>,
}
