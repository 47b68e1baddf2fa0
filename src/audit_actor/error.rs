//! Error types for the Audit actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditError {
    #[error("Audit record already exists: {0}")]
    AlreadyExists(String),

    #[error("Audit record validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AuditError {
    fn from(msg: String) -> Self {
        AuditError::ActorCommunicationError(msg)
    }
}
