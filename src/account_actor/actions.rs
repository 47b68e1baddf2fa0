//! Custom actions for the Account actor.
//!
//! Everything that touches an account's credentials, subscriptions, namespace
//! associations or personal data goes through one of these actions, so each change is
//! journaled by the actor when it runs inside a transaction.

use crate::model::{Account, Credential};
use uuid::Uuid;

/// Custom actions for Account entities.
#[derive(Debug, Clone)]
pub enum AccountAction {
    AddCredential(Credential),
    /// Removes the credential with this key.
    ///
    /// # Errors
    /// Fails if the account holds no such credential.
    RemoveCredential(Uuid),
    Subscribe(String),
    /// # Errors
    /// Fails if the account is not subscribed.
    Unsubscribe(String),
    /// Records that the account co-owns a reserved namespace.
    AttachNamespace(String),
    /// # Errors
    /// Fails if the namespace is not associated with the account.
    DetachNamespace(String),
    /// Clears personal data and marks the account deleted.
    ScrubPersonalData,
    /// Changes nothing. Under a transaction it takes the account's write lock and
    /// returns the account as seen by that transaction.
    Claim,
}

/// Results from AccountActions - variants match 1:1 with AccountAction
#[derive(Debug, Clone)]
pub enum AccountActionResult {
    AddCredential(()),
    /// The removed credential.
    RemoveCredential(Credential),
    Subscribe(()),
    Unsubscribe(()),
    AttachNamespace(()),
    DetachNamespace(()),
    ScrubPersonalData(()),
    Claim(Account),
}
