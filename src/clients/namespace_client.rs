//! # Namespace Client
//!
//! Reserved-namespace registry. An association is stored on both sides (the namespace's
//! owners and the account's `reserved_namespaces`), so this client writes to the Account
//! actor too, always under the same [`WriteScope`]. Registrations requested with
//! [`WriteScope::Immediate`] run in a transaction of their own over both actors, so a
//! failed attach never leaves a namespace behind.
use crate::clients::{entity_error, AccountClient};
use crate::model::{Account, NamespaceCreate, ReservedNamespace};
use crate::namespace_actor::{NamespaceAction, NamespaceActionResult, NamespaceError};
use crate::services::ReservedNamespaces;
use async_trait::async_trait;
use resource_actor::{
    ActorClient, FrameworkError, ResourceClient, TransactionCoordinator, TransactionParticipant,
    WriteScope,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Client for interacting with the Namespace actor.
#[derive(Clone)]
pub struct NamespaceClient {
    inner: ResourceClient<ReservedNamespace>,
    accounts: AccountClient,
    /// Spans this actor and the Account actor.
    registrations: TransactionCoordinator,
    release_orphaned: bool,
}

impl NamespaceClient {
    pub fn new(
        inner: ResourceClient<ReservedNamespace>,
        accounts: AccountClient,
        release_orphaned: bool,
    ) -> Self {
        let participants: Vec<Arc<dyn TransactionParticipant>> = vec![
            Arc::new(inner.clone()),
            Arc::new(accounts.inner().clone()),
        ];
        Self {
            inner,
            accounts,
            registrations: TransactionCoordinator::new(participants),
            release_orphaned,
        }
    }

    /// Runs `write` under `scope`. An immediate write is wrapped in a transaction over
    /// both actors and rolled back if any part of it fails.
    async fn on_both_sides<R, F, Fut>(&self, scope: WriteScope, write: F) -> Result<R, NamespaceError>
    where
        F: FnOnce(WriteScope) -> Fut,
        Fut: Future<Output = Result<R, NamespaceError>>,
    {
        if scope.txn().is_some() {
            return write(scope).await;
        }
        let txn = self.registrations.begin().await.map_err(Self::map_error)?;
        match write(txn.scope()).await {
            Ok(value) => {
                txn.commit().await.map_err(Self::map_error)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = txn.rollback().await {
                    error!(error = %rollback_error, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ActorClient<ReservedNamespace> for NamespaceClient {
    type Error = NamespaceError;

    fn inner(&self) -> &ResourceClient<ReservedNamespace> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<NamespaceError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => NamespaceError::NotFound(id),
            Err(FrameworkError::AlreadyExists(id)) => NamespaceError::AlreadyExists(id),
            Err(FrameworkError::Locked(id)) => NamespaceError::Locked(id),
            Err(other) => NamespaceError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl NamespaceClient {
    /// Reserves a namespace. Owners listed in `params` are attached on the account side
    /// as well; if any of them cannot be attached nothing is stored.
    #[instrument(skip(self), fields(namespace = %params.value))]
    pub async fn create_namespace(&self, params: NamespaceCreate) -> Result<String, NamespaceError> {
        debug!("Sending request");
        self.on_both_sides(WriteScope::Immediate, move |scope| async move {
            let owners = params.owners.clone();
            let value = self
                .inner
                .create(params, scope)
                .await
                .map_err(Self::map_error)?;
            for owner in owners {
                self.accounts.attach_namespace(&owner, &value, scope).await?;
            }
            Ok::<_, NamespaceError>(value)
        })
        .await
    }

    /// Adds `username` as a co-owner on both sides.
    #[instrument(skip(self))]
    pub async fn add_owner_to_namespace(
        &self,
        namespace: &str,
        username: &str,
        scope: WriteScope,
    ) -> Result<(), NamespaceError> {
        debug!("Sending request");
        let value = namespace.to_lowercase();
        self.on_both_sides(scope, |scope| async move {
            match self
                .inner
                .perform_action(value.clone(), NamespaceAction::AddOwner(username.to_string()), scope)
                .await
                .map_err(Self::map_error)?
            {
                NamespaceActionResult::AddOwner(()) => {}
                _ => unreachable!("AddOwner action must return AddOwner result"),
            }
            self.accounts.attach_namespace(username, &value, scope).await?;
            Ok::<_, NamespaceError>(())
        })
        .await
    }
}

#[async_trait]
impl ReservedNamespaces for NamespaceClient {
    #[instrument(skip(self, account), fields(username = %account.username, release_orphaned = self.release_orphaned))]
    async fn detach_reserved_namespace(
        &self,
        account: &Account,
        namespace: &str,
        scope: WriteScope,
    ) -> Result<(), NamespaceError> {
        debug!("Sending request");
        let value = namespace.to_lowercase();
        let remaining = match self
            .inner
            .perform_action(
                value.clone(),
                NamespaceAction::RemoveOwner(account.username.clone()),
                scope,
            )
            .await
            .map_err(Self::map_error)?
        {
            NamespaceActionResult::RemoveOwner(remaining) => remaining,
            _ => unreachable!("RemoveOwner action must return RemoveOwner result"),
        };
        self.accounts
            .detach_namespace(&account.username, &value, scope)
            .await?;

        if remaining == 0 && self.release_orphaned {
            self.inner
                .delete(value, scope)
                .await
                .map_err(Self::map_error)?;
            info!("Released orphaned namespace");
        }
        Ok(())
    }
}
