//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use crate::transaction::{TransactionParticipant, TxnId, WriteScope};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type‑safe, async API for interacting with a
/// `ResourceActor<T>`. It forwards requests over a Tokio mpsc channel and receives results
/// via oneshot channels. The client only holds a sender, so it is cheap to clone and can
/// be shared across tasks.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(
        &self,
        params: T::Create,
        scope: WriteScope,
    ) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create {
            params,
            scope,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Returns every entity accepted by `predicate`, in no particular order.
    pub async fn query(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let filter = Filter::new(predicate);
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }

    pub async fn update(
        &self,
        id: T::Id,
        update: T::Update,
        scope: WriteScope,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            scope,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id, scope: WriteScope) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete {
            id,
            scope,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
        scope: WriteScope,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            scope,
            respond_to,
        })
        .await
    }
}

#[async_trait]
impl<T: ActorEntity> TransactionParticipant for ResourceClient<T> {
    fn name(&self) -> &'static str {
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    async fn begin(&self, txn: TxnId) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Begin { txn, respond_to })
            .await
    }

    async fn commit(&self, txn: TxnId) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Commit { txn, respond_to })
            .await
    }

    async fn rollback(&self, txn: TxnId) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Rollback { txn, respond_to })
            .await
    }
}
