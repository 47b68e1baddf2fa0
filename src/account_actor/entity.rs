//! [`ActorEntity`] implementation for [`Account`].
//!
//! Accounts are keyed by username. A deactivated account refuses to gain new credentials,
//! subscriptions or namespaces; removals and scrubbing stay allowed so a deletion can be
//! replayed safely.

use super::actions::{AccountAction, AccountActionResult};
use super::error::AccountError;
use crate::model::{Account, AccountCreate, AccountUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Account {
    type Id = String;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Context = ();
    type Error = AccountError;

    fn from_create_params(params: AccountCreate) -> Result<Self, AccountError> {
        let username = params.username.trim();
        if username.is_empty() {
            return Err(AccountError::ValidationError(
                "username must not be empty".to_string(),
            ));
        }
        let mut account = Account::new(username);
        account.email_address = params.email_address;
        account.unconfirmed_email_address = params.unconfirmed_email_address;
        account.organizations = params.organizations.into_iter().collect();
        Ok(account)
    }

    fn id(&self) -> String {
        self.username.clone()
    }

    /// Applies profile changes.
    ///
    /// # Errors
    /// A deleted account cannot be updated.
    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), AccountError> {
        if self.is_deleted {
            return Err(AccountError::AccountDeleted(self.username.clone()));
        }
        if let Some(email) = update.email_address {
            self.email_address = Some(email);
        }
        if let Some(email) = update.unconfirmed_email_address {
            self.unconfirmed_email_address = Some(email);
        }
        if let Some(allowed) = update.email_allowed {
            self.email_allowed = allowed;
        }
        if let Some(notify) = update.notify_package_pushed {
            self.notify_package_pushed = notify;
        }
        if let Some(token) = update.email_confirmation_token {
            self.email_confirmation_token = Some(token);
        }
        if let Some(token) = update.password_reset_token {
            self.password_reset_token = Some(token);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        _ctx: &(),
    ) -> Result<AccountActionResult, AccountError> {
        match action {
            AccountAction::AddCredential(credential) => {
                self.ensure_active()?;
                self.credentials.push(credential);
                Ok(AccountActionResult::AddCredential(()))
            }
            AccountAction::RemoveCredential(key) => {
                let position = self
                    .credentials
                    .iter()
                    .position(|c| c.key == key)
                    .ok_or_else(|| AccountError::CredentialNotFound {
                        username: self.username.clone(),
                        key,
                    })?;
                Ok(AccountActionResult::RemoveCredential(
                    self.credentials.remove(position),
                ))
            }
            AccountAction::Subscribe(name) => {
                self.ensure_active()?;
                self.policy_subscriptions.insert(name);
                Ok(AccountActionResult::Subscribe(()))
            }
            AccountAction::Unsubscribe(name) => {
                if !self.policy_subscriptions.remove(&name) {
                    return Err(AccountError::SubscriptionNotFound {
                        username: self.username.clone(),
                        subscription: name,
                    });
                }
                Ok(AccountActionResult::Unsubscribe(()))
            }
            AccountAction::AttachNamespace(value) => {
                self.ensure_active()?;
                self.reserved_namespaces.insert(value.to_lowercase());
                Ok(AccountActionResult::AttachNamespace(()))
            }
            AccountAction::DetachNamespace(value) => {
                let value = value.to_lowercase();
                if !self.reserved_namespaces.remove(&value) {
                    return Err(AccountError::NamespaceNotAssociated {
                        username: self.username.clone(),
                        namespace: value,
                    });
                }
                Ok(AccountActionResult::DetachNamespace(()))
            }
            AccountAction::ScrubPersonalData => {
                self.scrub();
                Ok(AccountActionResult::ScrubPersonalData(()))
            }
            AccountAction::Claim => Ok(AccountActionResult::Claim(self.clone())),
        }
    }
}

impl Account {
    fn ensure_active(&self) -> Result<(), AccountError> {
        if self.is_deleted {
            Err(AccountError::AccountDeleted(self.username.clone()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Credential, CredentialKind};

    #[tokio::test]
    async fn test_blank_username_is_rejected() {
        let result = Account::from_create_params(AccountCreate::new("   "));
        assert!(matches!(result, Err(AccountError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_remove_unknown_credential_fails() {
        let mut account = Account::new("alice");
        account.credentials.push(Credential::new(CredentialKind::ApiKey));

        let missing = uuid::Uuid::new_v4();
        let result = account
            .handle_action(AccountAction::RemoveCredential(missing), &())
            .await;
        assert_eq!(
            result.unwrap_err(),
            AccountError::CredentialNotFound {
                username: "alice".into(),
                key: missing
            }
        );
        assert_eq!(account.credentials.len(), 1);
    }

    #[tokio::test]
    async fn test_deleted_account_cannot_gain_associations() {
        let mut account = Account::new("alice");
        account
            .handle_action(AccountAction::ScrubPersonalData, &())
            .await
            .unwrap();

        let result = account
            .handle_action(AccountAction::Subscribe("SecurityPolicy".into()), &())
            .await;
        assert!(matches!(result, Err(AccountError::AccountDeleted(_))));

        // Scrubbing again is harmless.
        assert!(account
            .handle_action(AccountAction::ScrubPersonalData, &())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_namespace_values_are_case_insensitive() {
        let mut account = Account::new("alice");
        account
            .handle_action(AccountAction::AttachNamespace("Contoso.".into()), &())
            .await
            .unwrap();
        assert!(account.reserved_namespaces.contains("contoso."));

        account
            .handle_action(AccountAction::DetachNamespace("CONTOSO.".into()), &())
            .await
            .unwrap();
        assert!(account.reserved_namespaces.is_empty());
    }
}
