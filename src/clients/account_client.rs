//! # Account Client
//!
//! Provides a high‑level API for interacting with the `Account` actor and serves as the
//! account store, the policy subscription store and the credential store.
use crate::account_actor::{AccountAction, AccountActionResult, AccountError};
use crate::clients::entity_error;
use crate::model::{Account, AccountCreate, AccountUpdate, Credential};
use crate::services::{AccountStore, CredentialStore, PolicySubscriptions};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, WriteScope};
use tracing::{debug, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<AccountError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AccountError::NotFound(id),
            Err(FrameworkError::AlreadyExists(id)) => AccountError::AlreadyExists(id),
            Err(FrameworkError::Locked(id)) => AccountError::Locked(id),
            Err(other) => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AccountClient {
    #[instrument(skip(self), fields(username = %params.username))]
    pub async fn create_account(&self, params: AccountCreate) -> Result<String, AccountError> {
        debug!("Sending request");
        self.inner
            .create(params, WriteScope::Immediate)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_account(
        &self,
        username: &str,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        self.inner
            .update(username.to_string(), update, WriteScope::Immediate)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        username: &str,
        subscription: &str,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(username, AccountAction::Subscribe(subscription.to_string()), scope)
            .await?
        {
            AccountActionResult::Subscribe(()) => Ok(()),
            _ => unreachable!("Subscribe action must return Subscribe result"),
        }
    }

    /// Records the account side of a namespace association.
    #[instrument(skip(self))]
    pub async fn attach_namespace(
        &self,
        username: &str,
        namespace: &str,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(username, AccountAction::AttachNamespace(namespace.to_string()), scope)
            .await?
        {
            AccountActionResult::AttachNamespace(()) => Ok(()),
            _ => unreachable!("AttachNamespace action must return AttachNamespace result"),
        }
    }

    /// Removes the account side of a namespace association.
    #[instrument(skip(self))]
    pub async fn detach_namespace(
        &self,
        username: &str,
        namespace: &str,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(username, AccountAction::DetachNamespace(namespace.to_string()), scope)
            .await?
        {
            AccountActionResult::DetachNamespace(()) => Ok(()),
            _ => unreachable!("DetachNamespace action must return DetachNamespace result"),
        }
    }

    async fn perform(
        &self,
        username: &str,
        action: AccountAction,
        scope: WriteScope,
    ) -> Result<AccountActionResult, AccountError> {
        self.inner
            .perform_action(username.to_string(), action, scope)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl AccountStore for AccountClient {
    async fn find_account(&self, username: &str) -> Result<Option<Account>, AccountError> {
        self.get(username.to_string()).await
    }

    #[instrument(skip(self))]
    async fn claim_account(
        &self,
        username: &str,
        scope: WriteScope,
    ) -> Result<Account, AccountError> {
        debug!("Sending request");
        match self.perform(username, AccountAction::Claim, scope).await? {
            AccountActionResult::Claim(account) => Ok(account),
            _ => unreachable!("Claim action must return Claim result"),
        }
    }

    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn scrub_personal_data(
        &self,
        account: &Account,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(&account.username, AccountAction::ScrubPersonalData, scope)
            .await?
        {
            AccountActionResult::ScrubPersonalData(()) => Ok(()),
            _ => unreachable!("ScrubPersonalData action must return ScrubPersonalData result"),
        }
    }
}

#[async_trait]
impl PolicySubscriptions for AccountClient {
    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn unsubscribe_policy(
        &self,
        account: &Account,
        subscription: &str,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(
                &account.username,
                AccountAction::Unsubscribe(subscription.to_string()),
                scope,
            )
            .await?
        {
            AccountActionResult::Unsubscribe(()) => Ok(()),
            _ => unreachable!("Unsubscribe action must return Unsubscribe result"),
        }
    }
}

#[async_trait]
impl CredentialStore for AccountClient {
    #[instrument(skip(self, account, credential), fields(username = %account.username, key = %credential.key))]
    async fn add_credential(
        &self,
        account: &Account,
        credential: Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(&account.username, AccountAction::AddCredential(credential), scope)
            .await?
        {
            AccountActionResult::AddCredential(()) => Ok(()),
            _ => unreachable!("AddCredential action must return AddCredential result"),
        }
    }

    #[instrument(skip(self, account, credential), fields(username = %account.username, key = %credential.key))]
    async fn remove_credential(
        &self,
        account: &Account,
        credential: &Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        debug!("Sending request");
        match self
            .perform(
                &account.username,
                AccountAction::RemoveCredential(credential.key),
                scope,
            )
            .await?
        {
            AccountActionResult::RemoveCredential(_) => Ok(()),
            _ => unreachable!("RemoveCredential action must return RemoveCredential result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CredentialKind;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn test_entity_errors_keep_their_type() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action("alice".to_string())
            .return_err(FrameworkError::EntityError(Box::new(
                AccountError::SubscriptionNotFound {
                    username: "alice".into(),
                    subscription: "SecurityPolicy".into(),
                },
            )));
        let client = AccountClient::new(mock.client());

        let result = client
            .unsubscribe_policy(&Account::new("alice"), "SecurityPolicy", WriteScope::Immediate)
            .await;

        assert!(matches!(
            result,
            Err(AccountError::SubscriptionNotFound { ref subscription, .. }) if subscription == "SecurityPolicy"
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_locked_account_is_reported() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_action("alice".to_string())
            .return_err(FrameworkError::Locked("alice".into()));
        let client = AccountClient::new(mock.client());

        let credential = Credential::new(CredentialKind::Password);
        let result = client
            .remove_credential(&Account::new("alice"), &credential, WriteScope::Immediate)
            .await;

        assert_eq!(result, Err(AccountError::Locked("alice".into())));
    }

    #[tokio::test]
    async fn test_credentials_round_trip_through_actor() {
        let (actor, client) = crate::account_actor::new(8);
        tokio::spawn(actor.run(()));
        client.create_account(AccountCreate::new("alice")).await.unwrap();
        let account = client.find_account("alice").await.unwrap().unwrap();

        let credential = Credential::new(CredentialKind::ApiKey).with_description("CI push key");
        client
            .add_credential(&account, credential.clone(), WriteScope::Immediate)
            .await
            .unwrap();
        let stored = client.find_account("alice").await.unwrap().unwrap();
        assert_eq!(stored.credentials, vec![credential.clone()]);
        assert_eq!(
            stored.credential(credential.key).and_then(|c| c.description.as_deref()),
            Some("CI push key")
        );

        client
            .remove_credential(&account, &credential, WriteScope::Immediate)
            .await
            .unwrap();
        let second = client
            .remove_credential(&account, &credential, WriteScope::Immediate)
            .await;
        assert!(matches!(second, Err(AccountError::CredentialNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_account_refuses_deleted_account() {
        let (actor, client) = crate::account_actor::new(8);
        tokio::spawn(actor.run(()));
        client.create_account(AccountCreate::new("alice")).await.unwrap();

        let update = AccountUpdate {
            email_address: Some("alice@example.com".into()),
            ..Default::default()
        };
        let updated = client.update_account("alice", update.clone()).await.unwrap();
        assert_eq!(updated.email_address.as_deref(), Some("alice@example.com"));

        client
            .scrub_personal_data(&updated, WriteScope::Immediate)
            .await
            .unwrap();
        let result = client.update_account("alice", update).await;
        assert_eq!(result, Err(AccountError::AccountDeleted("alice".into())));
    }

    #[tokio::test]
    async fn test_claim_conflicts_with_other_transactions() {
        use resource_actor::{TransactionParticipant, TxnId};

        let (actor, client) = crate::account_actor::new(8);
        tokio::spawn(actor.run(()));
        client.create_account(AccountCreate::new("alice")).await.unwrap();

        let holder = TxnId::new();
        client.inner().begin(holder).await.unwrap();
        let claimed = client
            .claim_account("alice", WriteScope::Deferred(holder))
            .await
            .unwrap();
        assert_eq!(claimed.username, "alice");

        let other = TxnId::new();
        client.inner().begin(other).await.unwrap();
        assert_eq!(
            client.claim_account("alice", WriteScope::Deferred(other)).await,
            Err(AccountError::Locked("alice".into()))
        );
        assert_eq!(
            client.claim_account("alice", WriteScope::Immediate).await,
            Err(AccountError::Locked("alice".into()))
        );

        client.inner().commit(holder).await.unwrap();
        assert!(client
            .claim_account("alice", WriteScope::Deferred(other))
            .await
            .is_ok());

        let missing = client.claim_account("bob", WriteScope::Immediate).await;
        assert_eq!(missing, Err(AccountError::NotFound("bob".into())));
    }
}
