//! Error types for the Namespace actor.

use thiserror::Error;

/// Errors that can occur during reserved-namespace operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NamespaceError {
    #[error("Reserved namespace not found: {0}")]
    NotFound(String),

    #[error("Reserved namespace already exists: {0}")]
    AlreadyExists(String),

    #[error("{owner} does not own reserved namespace {namespace}")]
    NotAnOwner { namespace: String, owner: String },

    #[error("Namespace validation error: {0}")]
    ValidationError(String),

    #[error("Reserved namespace locked by another transaction: {0}")]
    Locked(String),

    /// The account side of an association could not be updated.
    #[error("Account error: {0}")]
    Account(#[from] crate::account_actor::AccountError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for NamespaceError {
    fn from(msg: String) -> Self {
        NamespaceError::ActorCommunicationError(msg)
    }
}
