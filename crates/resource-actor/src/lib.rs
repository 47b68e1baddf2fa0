//! # Resource Actor
//!
//! Building blocks for type-safe, transactional resource stores on top of Tokio actors.
//! Each resource type (an account, a package registration, …) is owned by one
//! [`ResourceActor`] task that processes CRUD + Action requests sequentially, so its
//! state needs no locks. Callers talk to it through a cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - business rules of one resource
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, journals, locks
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//! 4. **Transaction Layer** ([`TransactionCoordinator`], [`Transaction`]) - atomic writes
//!    across several actors
//!
//! ## Transactions
//!
//! Every mutating request carries a [`WriteScope`]. `Immediate` writes are final when
//! the actor answers. `Deferred(txn)` writes are journaled by each actor and either
//! kept (`commit`) or undone (`rollback`). A [`Transaction`] dropped while open rolls
//! back on its own. See [`transaction`] for the isolation rules.
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor, TransactionCoordinator, TransactionParticipant};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)] struct Slot { name: String, taken: bool }
//! #[derive(Debug)] struct SlotCreate(String);
//! #[derive(Debug)] struct SlotUpdate;
//! #[derive(Debug)] enum SlotAction { Take }
//! #[derive(Debug, thiserror::Error)] #[error("slot already taken")] struct SlotError;
//!
//! #[async_trait]
//! impl ActorEntity for Slot {
//!     type Id = String; type Create = SlotCreate; type Update = SlotUpdate;
//!     type Action = SlotAction; type ActionResult = (); type Context = (); type Error = SlotError;
//!     fn from_create_params(p: SlotCreate) -> Result<Self, Self::Error> { Ok(Self { name: p.0, taken: false }) }
//!     fn id(&self) -> String { self.name.clone() }
//!     async fn on_update(&mut self, _: SlotUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: SlotAction, _: &()) -> Result<(), Self::Error> {
//!         if self.taken { return Err(SlotError); }
//!         self.taken = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, slots) = ResourceActor::<Slot>::new(10);
//!     tokio::spawn(actor.run(()));
//!     slots.create(SlotCreate("a".into()), resource_actor::WriteScope::Immediate).await.unwrap();
//!
//!     let participant: Arc<dyn TransactionParticipant> = Arc::new(slots.clone());
//!     let coordinator = TransactionCoordinator::new(vec![participant]);
//!
//!     let txn = coordinator.begin().await.unwrap();
//!     slots.perform_action("a".into(), SlotAction::Take, txn.scope()).await.unwrap();
//!     txn.rollback().await.unwrap();
//!
//!     assert!(!slots.get("a".into()).await.unwrap().unwrap().taken);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from a queue of expectations,
//! which makes failure injection (a store that refuses a write mid-transaction) trivial.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod transaction;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use transaction::{Transaction, TransactionCoordinator, TransactionParticipant, TxnId, WriteScope};
