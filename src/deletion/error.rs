//! Error types for the deletion workflow.

use crate::account_actor::AccountError;
use crate::audit_actor::AuditError;
use crate::namespace_actor::NamespaceError;
use crate::package_actor::PackageError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Why a deletion request failed.
///
/// `InvalidArgument` is raised before anything is touched. Every other variant is a
/// collaborator failure that aborted the remaining steps.
#[derive(Debug, Error)]
pub enum DeletionError {
    /// A required parameter was missing; the payload names it.
    #[error("Invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Beginning or committing the transaction failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] FrameworkError),
}
