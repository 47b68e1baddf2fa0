//! # Package Actor
//!
//! This module implements the PackageRegistration resource actor: owner sets, pending
//! ownership requests and the listed flag of every version.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`PackageRegistration`]
//! - [`error`] - [`PackageError`] type for type-safe error handling
//! - [`actions`] - [`PackageAction`] and [`PackageActionResult`] for ownership and listing
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Drop an owner (and any ownership invitation involving it)
//! package_client.remove_owner(&entry, &admin, &account, scope).await?;
//!
//! // Hide a version without deleting it
//! package_client.unlist_package_version(&key, scope).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PackageClient;
use crate::model::PackageRegistration;
use resource_actor::ResourceActor;

/// Creates a new Package actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<PackageRegistration>, PackageClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PackageClient::new(generic_client))
}
