//! Error types for the Package actor.

use thiserror::Error;

/// Errors that can occur during package registration operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PackageError {
    /// The requested package was not found.
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Package already exists: {0}")]
    AlreadyExists(String),

    #[error("Package {package_id} has no version {version}")]
    VersionNotFound { package_id: String, version: String },

    #[error("{owner} is not an owner of package {package_id}")]
    NotAnOwner { package_id: String, owner: String },

    /// The package data provided is invalid.
    #[error("Package validation error: {0}")]
    ValidationError(String),

    /// Another transaction holds uncommitted writes on the package.
    #[error("Package locked by another transaction: {0}")]
    Locked(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PackageError {
    fn from(msg: String) -> Self {
        PackageError::ActorCommunicationError(msg)
    }
}
