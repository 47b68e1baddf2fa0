//! # Namespace Actor
//!
//! This module implements the ReservedNamespace resource actor.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`ReservedNamespace`]
//! - [`error`] - [`NamespaceError`] type for type-safe error handling
//! - [`actions`] - [`NamespaceAction`] and [`NamespaceActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! An account/namespace association lives on both sides: the namespace's owner set here
//! and the account's `reserved_namespaces`. [`NamespaceClient`] keeps the two in step, so
//! it needs the [`AccountClient`] as well.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{AccountClient, NamespaceClient};
use crate::model::ReservedNamespace;
use resource_actor::ResourceActor;

/// Creates a new Namespace actor and its client.
///
/// `release_orphaned` controls whether a namespace left without owners is deleted.
pub fn new(
    buffer_size: usize,
    accounts: AccountClient,
    release_orphaned: bool,
) -> (ResourceActor<ReservedNamespace>, NamespaceClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (
        actor,
        NamespaceClient::new(generic_client, accounts, release_orphaned),
    )
}
