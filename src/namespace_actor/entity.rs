//! [`ActorEntity`] implementation for [`ReservedNamespace`].
//!
//! Namespaces are keyed by their lowercased value, so `Contoso.` and `contoso.` name the
//! same reservation.

use super::actions::{NamespaceAction, NamespaceActionResult};
use super::error::NamespaceError;
use crate::model::{NamespaceCreate, NamespaceUpdate, ReservedNamespace};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for ReservedNamespace {
    type Id = String;
    type Create = NamespaceCreate;
    type Update = NamespaceUpdate;
    type Action = NamespaceAction;
    type ActionResult = NamespaceActionResult;
    type Context = ();
    type Error = NamespaceError;

    fn from_create_params(params: NamespaceCreate) -> Result<Self, NamespaceError> {
        let value = params.value.trim().to_lowercase();
        if value.is_empty() {
            return Err(NamespaceError::ValidationError(
                "namespace value must not be empty".to_string(),
            ));
        }
        Ok(Self {
            value,
            is_prefix: params.is_prefix,
            is_shared: params.is_shared,
            owners: params.owners.into_iter().collect(),
        })
    }

    fn id(&self) -> String {
        self.value.clone()
    }

    async fn on_update(&mut self, update: NamespaceUpdate, _ctx: &()) -> Result<(), NamespaceError> {
        if let Some(shared) = update.is_shared {
            self.is_shared = shared;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: NamespaceAction,
        _ctx: &(),
    ) -> Result<NamespaceActionResult, NamespaceError> {
        match action {
            NamespaceAction::AddOwner(owner) => {
                self.owners.insert(owner);
                Ok(NamespaceActionResult::AddOwner(()))
            }
            NamespaceAction::RemoveOwner(owner) => {
                if !self.owners.remove(&owner) {
                    return Err(NamespaceError::NotAnOwner {
                        namespace: self.value.clone(),
                        owner,
                    });
                }
                Ok(NamespaceActionResult::RemoveOwner(self.owners.len()))
            }
        }
    }
}
