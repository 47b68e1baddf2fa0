//! Custom actions for the Namespace actor.

/// Custom actions for ReservedNamespace entities.
#[derive(Debug, Clone)]
pub enum NamespaceAction {
    AddOwner(String),
    /// # Errors
    /// Fails if the account does not own the namespace.
    RemoveOwner(String),
}

/// Results from NamespaceActions - variants match 1:1 with NamespaceAction
#[derive(Debug, Clone)]
pub enum NamespaceActionResult {
    AddOwner(()),
    /// Number of owners left after the removal.
    RemoveOwner(usize),
}
