//! # Account Actor
//!
//! This module implements the Account resource actor: profiles, credentials, policy
//! subscriptions and reserved-namespace associations of gallery users.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`AccountError`] type for type-safe error handling
//! - [`actions`] - [`AccountAction`] and [`AccountActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use gallery_accounts::account_actor;
//! use gallery_accounts::model::AccountCreate;
//! use resource_actor::WriteScope;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = account_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     client
//!         .create_account(AccountCreate::new("alice").with_email("alice@example.com"))
//!         .await?;
//!     client.subscribe("alice", "SecurityPolicy", WriteScope::Immediate).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::AccountClient;
use crate::model::Account;
use resource_actor::ResourceActor;

/// Creates a new Account actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AccountClient::new(generic_client))
}
