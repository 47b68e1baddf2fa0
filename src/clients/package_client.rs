//! # Package Client
//!
//! Provides a high‑level API for interacting with the `PackageRegistration` actor. It is
//! both the package directory and the ownership-management service.
use crate::clients::entity_error;
use crate::model::{Account, PackageCreate, PackageRegistration, PackageVersionKey};
use crate::package_actor::{PackageAction, PackageActionResult, PackageError};
use crate::services::{OwnershipManagement, PackageDirectory};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, WriteScope};
use tracing::{debug, info, instrument};

/// Client for interacting with the Package actor.
#[derive(Clone)]
pub struct PackageClient {
    inner: ResourceClient<PackageRegistration>,
}

impl PackageClient {
    pub fn new(inner: ResourceClient<PackageRegistration>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<PackageRegistration> for PackageClient {
    type Error = PackageError;

    fn inner(&self) -> &ResourceClient<PackageRegistration> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<PackageError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => PackageError::NotFound(id),
            Err(FrameworkError::AlreadyExists(id)) => PackageError::AlreadyExists(id),
            Err(FrameworkError::Locked(id)) => PackageError::Locked(id),
            Err(other) => PackageError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PackageClient {
    #[instrument(skip(self), fields(package_id = %params.id))]
    pub async fn create_package(&self, params: PackageCreate) -> Result<String, PackageError> {
        debug!("Sending request");
        self.inner
            .create(params, WriteScope::Immediate)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add_owner(
        &self,
        package_id: &str,
        owner: &str,
        scope: WriteScope,
    ) -> Result<(), PackageError> {
        debug!("Sending request");
        match self
            .perform(package_id, PackageAction::AddOwner(owner.to_string()), scope)
            .await?
        {
            PackageActionResult::AddOwner(()) => Ok(()),
            _ => unreachable!("AddOwner action must return AddOwner result"),
        }
    }

    /// Invites `new_owner` on behalf of the existing owner `requesting_owner`.
    #[instrument(skip(self))]
    pub async fn request_ownership(
        &self,
        package_id: &str,
        requesting_owner: &str,
        new_owner: &str,
    ) -> Result<(), PackageError> {
        debug!("Sending request");
        let action = PackageAction::RequestOwnership {
            requesting_owner: requesting_owner.to_string(),
            new_owner: new_owner.to_string(),
        };
        match self
            .perform(package_id, action, WriteScope::Immediate)
            .await?
        {
            PackageActionResult::RequestOwnership(()) => Ok(()),
            _ => unreachable!("RequestOwnership action must return RequestOwnership result"),
        }
    }

    async fn perform(
        &self,
        package_id: &str,
        action: PackageAction,
        scope: WriteScope,
    ) -> Result<PackageActionResult, PackageError> {
        self.inner
            .perform_action(package_id.to_string(), action, scope)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl PackageDirectory for PackageClient {
    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn list_packages_owned_by(
        &self,
        account: &Account,
    ) -> Result<Vec<PackageRegistration>, PackageError> {
        debug!("Sending request");
        let mut candidates = account.organizations.clone();
        candidates.insert(account.username.clone());
        let mut owned = self
            .inner
            .query(move |p: &PackageRegistration| !p.owners.is_disjoint(&candidates))
            .await
            .map_err(Self::map_error)?;
        owned.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(owned)
    }

    async fn find_package(&self, id: &str) -> Result<Option<PackageRegistration>, PackageError> {
        self.get(id.to_string()).await
    }

    #[instrument(skip(self, version), fields(version = %version))]
    async fn unlist_package_version(
        &self,
        version: &PackageVersionKey,
        scope: WriteScope,
    ) -> Result<(), PackageError> {
        debug!("Sending request");
        match self
            .perform(
                &version.package_id,
                PackageAction::Unlist(version.version.clone()),
                scope,
            )
            .await?
        {
            PackageActionResult::Unlist(_) => Ok(()),
            _ => unreachable!("Unlist action must return Unlist result"),
        }
    }
}

#[async_trait]
impl OwnershipManagement for PackageClient {
    #[instrument(
        skip(self, entry, acting_admin, account),
        fields(package_id = %entry.id, admin = %acting_admin.username, owner = %account.username)
    )]
    async fn remove_owner(
        &self,
        entry: &PackageRegistration,
        acting_admin: &Account,
        account: &Account,
        scope: WriteScope,
    ) -> Result<(), PackageError> {
        debug!("Sending request");
        match self
            .perform(
                &entry.id,
                PackageAction::RemoveOwner(account.username.clone()),
                scope,
            )
            .await?
        {
            PackageActionResult::RemoveOwner(true) => {
                info!("Owner removed");
                Ok(())
            }
            PackageActionResult::RemoveOwner(false) => {
                debug!("Not a direct owner, only pending requests dropped");
                Ok(())
            }
            _ => unreachable!("RemoveOwner action must return RemoveOwner result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::create_mock_client;
    use resource_actor::ResourceRequest;

    #[tokio::test]
    async fn test_list_includes_packages_owned_through_organizations() {
        let (actor, client) = crate::package_actor::new(8);
        tokio::spawn(actor.run(()));
        for create in [
            PackageCreate::new("Alice.Tools").owned_by("alice").with_version("1.0.0"),
            PackageCreate::new("Contoso.Logging").owned_by("Contoso").with_version("2.0.0"),
            PackageCreate::new("Bob.Tools").owned_by("bob").with_version("0.1.0"),
        ] {
            client.create_package(create).await.unwrap();
        }

        let mut alice = Account::new("alice");
        alice.organizations.insert("Contoso".into());

        let owned: Vec<String> = client
            .list_packages_owned_by(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(owned, vec!["Alice.Tools", "Contoso.Logging"]);
    }

    #[tokio::test]
    async fn test_unlist_sends_version_and_scope() {
        let (generic, mut receiver) = create_mock_client::<PackageRegistration>(4);
        let client = PackageClient::new(generic);
        let txn = resource_actor::TxnId::new();

        let task = tokio::spawn(async move {
            client
                .unlist_package_version(
                    &PackageVersionKey::new("Contoso.Logging", "2.0.0"),
                    WriteScope::Deferred(txn),
                )
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Action {
                id,
                action: PackageAction::Unlist(version),
                scope,
                respond_to,
            }) => {
                assert_eq!(id, "Contoso.Logging");
                assert_eq!(version, "2.0.0");
                assert_eq!(scope, WriteScope::Deferred(txn));
                respond_to.send(Ok(PackageActionResult::Unlist(true))).unwrap();
            }
            other => panic!("Expected Unlist action, got {:?}", other),
        }
        assert!(task.await.unwrap().is_ok());
    }
}
