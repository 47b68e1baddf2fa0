//! [`ActorEntity`] implementation for [`PackageRegistration`].

use super::actions::{PackageAction, PackageActionResult};
use super::error::PackageError;
use crate::model::{OwnershipRequest, PackageCreate, PackageRegistration, PackageUpdate, PackageVersion};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for PackageRegistration {
    type Id = String;
    type Create = PackageCreate;
    type Update = PackageUpdate;
    type Action = PackageAction;
    type ActionResult = PackageActionResult;
    type Context = ();
    type Error = PackageError;

    fn from_create_params(params: PackageCreate) -> Result<Self, PackageError> {
        if params.id.trim().is_empty() {
            return Err(PackageError::ValidationError(
                "package id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: params.id,
            owners: params.owners.into_iter().collect(),
            versions: params
                .versions
                .into_iter()
                .map(|version| PackageVersion {
                    version,
                    listed: true,
                })
                .collect(),
            pending_owner_requests: Vec::new(),
        })
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    async fn on_update(&mut self, update: PackageUpdate, _ctx: &()) -> Result<(), PackageError> {
        for version in update.add_versions {
            if self.version_mut(&version).is_none() {
                self.versions.push(PackageVersion {
                    version,
                    listed: true,
                });
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PackageAction,
        _ctx: &(),
    ) -> Result<PackageActionResult, PackageError> {
        match action {
            PackageAction::AddOwner(owner) => {
                self.pending_owner_requests.retain(|r| r.new_owner != owner);
                self.owners.insert(owner);
                Ok(PackageActionResult::AddOwner(()))
            }
            PackageAction::RemoveOwner(owner) => {
                let was_owner = self.owners.remove(&owner);
                self.pending_owner_requests.retain(|r| !r.involves(&owner));
                Ok(PackageActionResult::RemoveOwner(was_owner))
            }
            PackageAction::RequestOwnership {
                requesting_owner,
                new_owner,
            } => {
                if !self.owners.contains(&requesting_owner) {
                    return Err(PackageError::NotAnOwner {
                        package_id: self.id.clone(),
                        owner: requesting_owner,
                    });
                }
                self.pending_owner_requests.push(OwnershipRequest {
                    requesting_owner,
                    new_owner,
                });
                Ok(PackageActionResult::RequestOwnership(()))
            }
            PackageAction::Unlist(version) => {
                let package_id = self.id.clone();
                let entry = self
                    .version_mut(&version)
                    .ok_or(PackageError::VersionNotFound {
                        package_id,
                        version,
                    })?;
                let was_listed = entry.listed;
                entry.listed = false;
                Ok(PackageActionResult::Unlist(was_listed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> PackageRegistration {
        PackageRegistration::from_create_params(
            PackageCreate::new("Contoso.Logging")
                .owned_by("alice")
                .owned_by("bob")
                .with_version("1.0.0"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_remove_owner_drops_pending_requests() {
        let mut package = registration();
        package
            .handle_action(
                PackageAction::RequestOwnership {
                    requesting_owner: "bob".into(),
                    new_owner: "carol".into(),
                },
                &(),
            )
            .await
            .unwrap();
        package
            .handle_action(
                PackageAction::RequestOwnership {
                    requesting_owner: "alice".into(),
                    new_owner: "dave".into(),
                },
                &(),
            )
            .await
            .unwrap();

        let result = package
            .handle_action(PackageAction::RemoveOwner("alice".into()), &())
            .await
            .unwrap();

        assert!(matches!(result, PackageActionResult::RemoveOwner(true)));
        assert_eq!(package.owners.len(), 1);
        assert_eq!(package.pending_owner_requests.len(), 1);
        assert_eq!(package.pending_owner_requests[0].new_owner, "carol");
    }

    #[tokio::test]
    async fn test_removing_absent_owner_is_noop() {
        let mut package = registration();
        let result = package
            .handle_action(PackageAction::RemoveOwner("mallory".into()), &())
            .await
            .unwrap();
        assert!(matches!(result, PackageActionResult::RemoveOwner(false)));
        assert_eq!(package.owners.len(), 2);
    }

    #[tokio::test]
    async fn test_unlist_is_idempotent_and_checks_version() {
        let mut package = registration();
        let first = package
            .handle_action(PackageAction::Unlist("1.0.0".into()), &())
            .await
            .unwrap();
        let second = package
            .handle_action(PackageAction::Unlist("1.0.0".into()), &())
            .await
            .unwrap();
        assert!(matches!(first, PackageActionResult::Unlist(true)));
        assert!(matches!(second, PackageActionResult::Unlist(false)));
        assert_eq!(package.listed_versions().count(), 0);

        let missing = package
            .handle_action(PackageAction::Unlist("9.9.9".into()), &())
            .await;
        assert!(matches!(missing, Err(PackageError::VersionNotFound { .. })));
    }
}
