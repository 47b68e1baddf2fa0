//! # Collaborator Capabilities
//!
//! Narrow interfaces the [`AccountDeleter`](crate::deletion::AccountDeleter) depends on.
//! The actor-backed clients in [`clients`](crate::clients) implement all of them; tests
//! swap any single one for a double.
//!
//! Every mutating operation takes a [`WriteScope`]: `Immediate` commits on its own,
//! `Deferred(txn)` leaves the write to be committed or rolled back with the transaction
//! obtained from [`TransactionBoundary::begin`].

use crate::account_actor::AccountError;
use crate::audit_actor::AuditError;
use crate::model::{Account, Credential, DeletionAuditRecord, PackageRegistration, PackageVersionKey};
use crate::namespace_actor::NamespaceError;
use crate::package_actor::PackageError;
use async_trait::async_trait;
use resource_actor::{FrameworkError, Transaction, TransactionCoordinator, WriteScope};
use uuid::Uuid;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Reads the account for a writer. Fails with `Locked` while another transaction
    /// holds the account, and keeps it locked for `scope` until that scope ends.
    async fn claim_account(&self, username: &str, scope: WriteScope)
        -> Result<Account, AccountError>;

    /// Clears email addresses, tokens and memberships and sets the deactivation flag.
    async fn scrub_personal_data(
        &self,
        account: &Account,
        scope: WriteScope,
    ) -> Result<(), AccountError>;
}

#[async_trait]
pub trait PackageDirectory: Send + Sync {
    /// Registrations owned by the account itself or by one of its organizations.
    async fn list_packages_owned_by(
        &self,
        account: &Account,
    ) -> Result<Vec<PackageRegistration>, PackageError>;

    async fn find_package(&self, id: &str) -> Result<Option<PackageRegistration>, PackageError>;

    async fn unlist_package_version(
        &self,
        version: &PackageVersionKey,
        scope: WriteScope,
    ) -> Result<(), PackageError>;
}

#[async_trait]
pub trait OwnershipManagement: Send + Sync {
    /// Removes `account` from the owners of `entry`, together with any pending ownership
    /// request it takes part in.
    async fn remove_owner(
        &self,
        entry: &PackageRegistration,
        acting_admin: &Account,
        account: &Account,
        scope: WriteScope,
    ) -> Result<(), PackageError>;
}

#[async_trait]
pub trait ReservedNamespaces: Send + Sync {
    /// Dissociates `account` from `namespace`; the registry decides whether an orphaned
    /// namespace is released.
    async fn detach_reserved_namespace(
        &self,
        account: &Account,
        namespace: &str,
        scope: WriteScope,
    ) -> Result<(), NamespaceError>;
}

#[async_trait]
pub trait PolicySubscriptions: Send + Sync {
    async fn unsubscribe_policy(
        &self,
        account: &Account,
        subscription: &str,
        scope: WriteScope,
    ) -> Result<(), AccountError>;
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn add_credential(
        &self,
        account: &Account,
        credential: Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError>;

    async fn remove_credential(
        &self,
        account: &Account,
        credential: &Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Persists `record` and returns its id.
    async fn insert_audit_record(
        &self,
        record: DeletionAuditRecord,
        scope: WriteScope,
    ) -> Result<Uuid, AuditError>;

    /// Every record about the deleted account `username`, oldest first.
    async fn records_for(&self, username: &str) -> Result<Vec<DeletionAuditRecord>, AuditError>;
}

/// Opens transactions spanning every store the workflow writes to.
#[async_trait]
pub trait TransactionBoundary: Send + Sync {
    async fn begin(&self) -> Result<Transaction, FrameworkError>;
}

#[async_trait]
impl TransactionBoundary for TransactionCoordinator {
    async fn begin(&self) -> Result<Transaction, FrameworkError> {
        TransactionCoordinator::begin(self).await
    }
}
