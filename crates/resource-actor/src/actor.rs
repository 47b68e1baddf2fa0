//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of one
//! resource type. It processes messages sequentially, which gives it exclusive access to
//! its store, its transaction journals and its lock table without any `Mutex`.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::transaction::{TxnId, WriteScope};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// * **Concurrency model** – each actor processes one message at a time, eliminating data races.
/// * **Context injection** – a user‑provided `Context` is passed to every lifecycle hook.
/// * **Transactions** – deferred writes are journaled per [`TxnId`] and the touched
///   entities are locked until commit or rollback.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor, WriteScope};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { name: String }
/// #[derive(Debug)] struct TagCreate(String);
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] enum TagAction {}
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = String;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Action = TagAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(params: TagCreate) -> Result<Self, Self::Error> { Ok(Self { name: params.0 }) }
///     fn id(&self) -> String { self.name.clone() }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, action: TagAction, _: &()) -> Result<(), Self::Error> { match action {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(TagCreate("rust".into()), WriteScope::Immediate).await.unwrap();
///     assert_eq!(id, "rust");
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Prior values per open transaction, in write order.
    journals: HashMap<TxnId, Vec<(T::Id, Option<T>)>>,
    locks: HashMap<T::Id, TxnId>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full,
    /// calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            journals: HashMap::new(),
            locks: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Checks that `scope` may write `id`.
    fn check_writable(&self, id: &T::Id, scope: WriteScope) -> Result<(), FrameworkError> {
        if let Some(txn) = scope.txn() {
            if !self.journals.contains_key(&txn) {
                return Err(FrameworkError::UnknownTransaction(txn));
            }
        }
        match self.locks.get(id) {
            Some(holder) if Some(*holder) != scope.txn() => {
                Err(FrameworkError::Locked(id.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Records `prior` for `id` in the journal of `scope` and locks the entity.
    fn record(&mut self, id: &T::Id, prior: Option<T>, scope: WriteScope) {
        if let Some(txn) = scope.txn() {
            if let Some(journal) = self.journals.get_mut(&txn) {
                journal.push((id.clone(), prior));
                self.locks.insert(id.clone(), txn);
            }
        }
    }

    fn release_locks(&mut self, txn: TxnId) {
        self.locks.retain(|_, holder| *holder != txn);
    }

    fn rollback(&mut self, txn: TxnId) -> Result<usize, FrameworkError> {
        let journal = self
            .journals
            .remove(&txn)
            .ok_or(FrameworkError::UnknownTransaction(txn))?;
        let undone = journal.len();
        for (id, prior) in journal.into_iter().rev() {
            match prior {
                Some(item) => {
                    self.store.insert(id, item);
                }
                None => {
                    self.store.remove(&id);
                }
            }
        }
        self.release_locks(txn);
        Ok(undone)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Account" instead of "gallery_accounts::model::account::Account")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    params,
                    scope,
                    respond_to,
                } => {
                    debug!(entity_type, ?params, ?scope, "Create");
                    let mut item = match T::from_create_params(params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    let id = item.id();
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    if let Err(e) = self.check_writable(&id, scope) {
                        warn!(entity_type, %id, error = %e, "Create rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, %id, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.record(&id, None, scope);
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    scope,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, ?scope, "Update");
                    let Some(current) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = self.check_writable(&id, scope) {
                        warn!(entity_type, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let mut item = current.clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.record(&id, Some(current), scope);
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete {
                    id,
                    scope,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?scope, "Delete");
                    let Some(current) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = self.check_writable(&id, scope) {
                        warn!(entity_type, %id, error = %e, "Delete rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    if let Err(e) = current.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.record(&id, Some(current), scope);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    scope,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, ?scope, "Action");
                    let Some(current) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = self.check_writable(&id, scope) {
                        warn!(entity_type, %id, error = %e, "Action rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let mut item = current.clone();
                    match item.handle_action(action, &context).await {
                        Ok(result) => {
                            self.record(&id, Some(current), scope);
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Begin { txn, respond_to } => {
                    debug!(entity_type, %txn, "Begin");
                    self.journals.entry(txn).or_default();
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Commit { txn, respond_to } => match self.journals.remove(&txn) {
                    Some(journal) => {
                        self.release_locks(txn);
                        info!(entity_type, %txn, writes = journal.len(), "Committed");
                        let _ = respond_to.send(Ok(()));
                    }
                    None => {
                        warn!(entity_type, %txn, "Commit of unknown transaction");
                        let _ = respond_to.send(Err(FrameworkError::UnknownTransaction(txn)));
                    }
                },
                ResourceRequest::Rollback { txn, respond_to } => {
                    let result = self.rollback(txn);
                    match &result {
                        Ok(undone) => info!(entity_type, %txn, undone, "Rolled back"),
                        Err(e) => warn!(entity_type, %txn, error = %e, "Rollback failed"),
                    }
                    let _ = respond_to.send(result.map(|_| ()));
                }
            }
        }

        if !self.journals.is_empty() {
            warn!(entity_type, open = self.journals.len(), "Shutdown with open transactions");
        }
        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
