//! # Framework Errors
//!
//! Common error types shared by every resource actor and client. Resource crates map
//! these into their own error enums through [`ActorClient::map_error`](crate::ActorClient::map_error).

use crate::transaction::TxnId;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    /// The entity has uncommitted writes from another transaction.
    #[error("Item locked by another transaction: {0}")]
    Locked(String),
    #[error("Unknown or finished transaction: {0}")]
    UnknownTransaction(TxnId),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
