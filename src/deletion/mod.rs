//! # Account Deletion
//!
//! [`AccountDeleter`] deactivates one account by walking every collaborator that holds
//! state about it:
//!
//! 1. package registrations owned by the account (directly or through an organization)
//!    lose the account as owner; orphaned ones are unlisted if requested
//! 2. reserved namespaces are detached (the registry may release orphans)
//! 3. policy subscriptions are removed
//! 4. credentials are removed
//! 5. personal data is scrubbed and the account is marked deleted
//! 6. a [`DeletionAuditRecord`] is written
//!
//! With [`CommitMode::Transaction`] all of it is one transaction. With
//! [`CommitMode::BestEffort`] each call commits on its own and a failure part-way leaves
//! the earlier steps applied.
//!
//! Deleting an account that is already deactivated is a no-op: nothing is written and no
//! audit record is created, so a failed request can be retried as a whole. The stored
//! account is read under the deletion's own write lock: a retry sent while an earlier
//! request is still running fails with `Locked` instead of reporting a deletion that
//! may yet roll back.

pub mod error;
pub mod options;
pub mod result;

pub use error::*;
pub use options::*;
pub use result::*;

use crate::model::{Account, DeletionAuditRecord, PackageVersionKey};
use crate::services::{
    AccountStore, AuditLog, CredentialStore, OwnershipManagement, PackageDirectory,
    PolicySubscriptions, ReservedNamespaces, TransactionBoundary,
};
use resource_actor::WriteScope;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Span};
use uuid::Uuid;

/// Everything the deletion workflow talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub accounts: Arc<dyn AccountStore>,
    pub packages: Arc<dyn PackageDirectory>,
    pub ownership: Arc<dyn OwnershipManagement>,
    pub namespaces: Arc<dyn ReservedNamespaces>,
    pub subscriptions: Arc<dyn PolicySubscriptions>,
    pub credentials: Arc<dyn CredentialStore>,
    pub audit: Arc<dyn AuditLog>,
    pub transactions: Arc<dyn TransactionBoundary>,
}

/// Orchestrates account deletion. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct AccountDeleter {
    services: Collaborators,
}

impl AccountDeleter {
    pub fn new(services: Collaborators) -> Self {
        Self { services }
    }

    /// Deactivates `user_to_delete` on behalf of `acting_admin`.
    ///
    /// # Errors
    /// - [`DeletionError::InvalidArgument`] if either account is missing. Nothing is
    ///   changed.
    /// - Any collaborator failure. In [`CommitMode::Transaction`] everything done so far
    ///   is rolled back first. In [`CommitMode::BestEffort`] the steps completed before
    ///   the failure **stay applied**.
    /// - [`DeletionError::Transaction`] from the commit itself. The participants that
    ///   did commit keep their writes, so the account may already be deactivated.
    /// - `Locked` from the account store while another deletion of the same account is
    ///   still running. Nothing is changed and the call can be retried.
    #[instrument(
        skip_all,
        fields(account = tracing::field::Empty, admin = tracing::field::Empty, mode = ?options.commit_mode)
    )]
    pub async fn delete_account(
        &self,
        user_to_delete: Option<&Account>,
        acting_admin: Option<&Account>,
        options: &DeleteAccountOptions,
    ) -> Result<DeletionResult, DeletionError> {
        let user = user_to_delete.ok_or(DeletionError::InvalidArgument("user_to_delete"))?;
        let admin = acting_admin.ok_or(DeletionError::InvalidArgument("acting_admin"))?;
        Span::current().record("account", user.username.as_str());
        Span::current().record("admin", admin.username.as_str());

        if user.is_deleted {
            info!("Account already deleted, nothing to do");
            return Ok(DeletionResult::already_deleted(&user.username));
        }

        let record_id = match options.commit_mode {
            CommitMode::BestEffort => {
                self.deactivate(&user.username, admin, options, WriteScope::Immediate)
                    .await?
            }
            CommitMode::Transaction => {
                let txn = self.services.transactions.begin().await?;
                debug!(txn = %txn.id(), "Transaction opened");
                match self
                    .deactivate(&user.username, admin, options, txn.scope())
                    .await
                {
                    Ok(record_id) => {
                        txn.commit().await?;
                        record_id
                    }
                    Err(e) => {
                        warn!(error = %e, "Deletion failed, rolling back");
                        if let Err(rollback_error) = txn.rollback().await {
                            error!(error = %rollback_error, "Rollback failed");
                        }
                        return Err(e);
                    }
                }
            }
        };

        let Some(record_id) = record_id else {
            return Ok(DeletionResult::already_deleted(&user.username));
        };
        info!(%record_id, "Account deleted");
        Ok(DeletionResult::deleted(&user.username, record_id))
    }

    /// Claims the stored account under `scope`, then removes its data. Returns `None`
    /// when the account is already deactivated.
    ///
    /// The claim fails with `Locked` while another deletion of the same account is in
    /// flight, so a concurrent retry never mistakes uncommitted changes for a finished
    /// deletion.
    async fn deactivate(
        &self,
        username: &str,
        admin: &Account,
        options: &DeleteAccountOptions,
        scope: WriteScope,
    ) -> Result<Option<Uuid>, DeletionError> {
        let account = self.services.accounts.claim_account(username, scope).await?;
        if account.is_deleted {
            info!("Account already deleted, nothing to do");
            return Ok(None);
        }
        self.remove_account_data(&account, admin, options, scope)
            .await
            .map(Some)
    }

    /// Looks both accounts up by username, then runs [`Self::delete_account`]. An unknown
    /// username counts as a missing argument.
    pub async fn delete_account_by_username(
        &self,
        username: &str,
        admin_username: &str,
        options: &DeleteAccountOptions,
    ) -> Result<DeletionResult, DeletionError> {
        let user = self.services.accounts.find_account(username).await?;
        let admin = self.services.accounts.find_account(admin_username).await?;
        self.delete_account(user.as_ref(), admin.as_ref(), options)
            .await
    }

    /// Steps 1-6 of the workflow; returns the audit record id.
    async fn remove_account_data(
        &self,
        account: &Account,
        admin: &Account,
        options: &DeleteAccountOptions,
        scope: WriteScope,
    ) -> Result<Uuid, DeletionError> {
        let owned = self.services.packages.list_packages_owned_by(account).await?;
        debug!(packages = owned.len(), "Removing package ownership");
        for entry in &owned {
            self.services
                .ownership
                .remove_owner(entry, admin, account, scope)
                .await?;
            if options.orphan_policy == OrphanPackagePolicy::UnlistOrphans {
                self.unlist_if_orphaned(&entry.id, scope).await?;
            }
        }

        debug!(namespaces = account.reserved_namespaces.len(), "Detaching reserved namespaces");
        for namespace in &account.reserved_namespaces {
            self.services
                .namespaces
                .detach_reserved_namespace(account, namespace, scope)
                .await?;
        }

        debug!(subscriptions = account.policy_subscriptions.len(), "Removing policy subscriptions");
        for subscription in &account.policy_subscriptions {
            self.services
                .subscriptions
                .unsubscribe_policy(account, subscription, scope)
                .await?;
        }

        debug!(credentials = account.credentials.len(), "Removing credentials");
        for credential in &account.credentials {
            self.services
                .credentials
                .remove_credential(account, credential, scope)
                .await?;
        }

        self.services
            .accounts
            .scrub_personal_data(account, scope)
            .await?;

        let record = DeletionAuditRecord::new(
            &account.username,
            &admin.username,
            &options.signature,
            deleted_description(&account.username),
        );
        let record_id = self.services.audit.insert_audit_record(record, scope).await?;
        Ok(record_id)
    }

    async fn unlist_if_orphaned(&self, package_id: &str, scope: WriteScope) -> Result<(), DeletionError> {
        let Some(entry) = self.services.packages.find_package(package_id).await? else {
            return Ok(());
        };
        if !entry.is_orphaned() {
            return Ok(());
        }
        for version in entry.listed_versions() {
            let key = PackageVersionKey::new(&entry.id, &version.version);
            self.services
                .packages
                .unlist_package_version(&key, scope)
                .await?;
        }
        debug!(package_id, "Unlisted orphaned package");
        Ok(())
    }
}
