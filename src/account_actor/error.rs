//! Error types for the Account actor.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// An account with the same username already exists.
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// The account data provided is invalid.
    #[error("Account validation error: {0}")]
    ValidationError(String),

    /// The account is deactivated and cannot gain new associations.
    #[error("Account is deleted: {0}")]
    AccountDeleted(String),

    #[error("Credential {key} not found on account {username}")]
    CredentialNotFound { username: String, key: Uuid },

    #[error("Account {username} is not subscribed to {subscription}")]
    SubscriptionNotFound {
        username: String,
        subscription: String,
    },

    #[error("Account {username} is not associated with namespace {namespace}")]
    NamespaceNotAssociated { username: String, namespace: String },

    /// Another transaction holds uncommitted writes on the account.
    #[error("Account locked by another transaction: {0}")]
    Locked(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AccountError {
    fn from(msg: String) -> Self {
        AccountError::ActorCommunicationError(msg)
    }
}
