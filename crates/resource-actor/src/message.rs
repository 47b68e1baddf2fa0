//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::transaction::{TxnId, WriteScope};
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate evaluated inside the actor for [`ResourceRequest::Query`].
pub struct Filter<T>(pub Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to **CRUD** operations on one resource type, plus a custom `Action`
/// variant for resource-specific logic, a `Query` for filtered listing, and the three
/// transaction control messages.
///
/// Every mutating variant carries a [`WriteScope`]. `Immediate` writes are final as soon
/// as the actor answers; `Deferred(txn)` writes are journaled and locked until the
/// transaction is committed or rolled back.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        scope: WriteScope,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        scope: WriteScope,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        scope: WriteScope,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        scope: WriteScope,
        respond_to: Response<T::ActionResult>,
    },
    Begin {
        txn: TxnId,
        respond_to: Response<()>,
    },
    Commit {
        txn: TxnId,
        respond_to: Response<()>,
    },
    Rollback {
        txn: TxnId,
        respond_to: Response<()>,
    },
}
