//! Gallery accounts and the credentials attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A registered gallery account.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
/// Accounts are keyed by `username`.
///
/// See [`impl ActorEntity for Account`](#impl-ActorEntity-for-Account) for details on:
/// - Creation parameters ([`AccountCreate`])
/// - Update parameters ([`AccountUpdate`])
/// - Custom actions ([`AccountAction`](crate::account_actor::AccountAction))
///
/// # Deactivation
/// A deleted account keeps its username (so package history still resolves) but holds no
/// personal data: both email addresses and both tokens are cleared, notifications are
/// off, and it has no credentials, subscriptions, namespaces or organization memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub email_address: Option<String>,
    pub unconfirmed_email_address: Option<String>,
    pub email_allowed: bool,
    pub notify_package_pushed: bool,
    pub email_confirmation_token: Option<String>,
    pub password_reset_token: Option<String>,
    pub credentials: Vec<Credential>,
    pub policy_subscriptions: BTreeSet<String>,
    /// Lowercased values of the reserved namespaces this account co-owns.
    pub reserved_namespaces: BTreeSet<String>,
    /// Organizations this account is a member of.
    pub organizations: BTreeSet<String>,
    pub is_deleted: bool,
}

impl Account {
    /// Creates an active account with no associations.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email_address: None,
            unconfirmed_email_address: None,
            email_allowed: true,
            notify_package_pushed: true,
            email_confirmation_token: None,
            password_reset_token: None,
            credentials: Vec::new(),
            policy_subscriptions: BTreeSet::new(),
            reserved_namespaces: BTreeSet::new(),
            organizations: BTreeSet::new(),
            is_deleted: false,
        }
    }

    pub fn credential(&self, key: Uuid) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.key == key)
    }

    /// Clears every piece of personal data and marks the account deleted.
    pub fn scrub(&mut self) {
        self.email_address = None;
        self.unconfirmed_email_address = None;
        self.email_allowed = false;
        self.notify_package_pushed = false;
        self.email_confirmation_token = None;
        self.password_reset_token = None;
        self.credentials.clear();
        self.organizations.clear();
        self.is_deleted = true;
    }
}

/// Payload for creating a new account.
#[derive(Debug, Clone, Default)]
pub struct AccountCreate {
    pub username: String,
    pub email_address: Option<String>,
    pub unconfirmed_email_address: Option<String>,
    pub organizations: Vec<String>,
}

impl AccountCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email_address = Some(email.into());
        self
    }

    pub fn with_unconfirmed_email(mut self, email: impl Into<String>) -> Self {
        self.unconfirmed_email_address = Some(email.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organizations.push(organization.into());
        self
    }
}

/// Profile changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub email_address: Option<String>,
    pub unconfirmed_email_address: Option<String>,
    pub email_allowed: Option<bool>,
    pub notify_package_pushed: Option<bool>,
    pub email_confirmation_token: Option<String>,
    pub password_reset_token: Option<String>,
}

/// A way to sign in or to push packages on behalf of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub key: Uuid,
    pub kind: CredentialKind,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub scopes: Vec<Scope>,
}

impl Credential {
    pub fn new(kind: CredentialKind) -> Self {
        Self {
            key: Uuid::new_v4(),
            kind,
            description: None,
            created_at: Utc::now(),
            scopes: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialKind {
    Password,
    ApiKey,
    /// Sign-in through an external identity provider, e.g. `"MicrosoftAccount"`.
    External(String),
}

/// Authorization restriction attached to a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Account or organization the credential may act for.
    pub owner: Option<String>,
    /// Package id glob, e.g. `"Contoso.*"`.
    pub subject: String,
    /// e.g. `"package:push"`.
    pub allowed_action: String,
}
