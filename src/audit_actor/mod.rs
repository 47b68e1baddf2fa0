//! # Audit Actor
//!
//! Append-only store of [`DeletionAuditRecord`]s. Records are created whole and can
//! never be changed: both the update and the action type are uninhabited.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AuditClient;
use crate::model::DeletionAuditRecord;
use resource_actor::ResourceActor;

/// Creates a new Audit actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<DeletionAuditRecord>, AuditClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AuditClient::new(generic_client))
}
