//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and stops the resource actors behind the gallery services.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - one actor per entity kind (accounts, packages, namespaces, audit)
//! 2. **Dependency Wiring** - the namespace registry gets the account client, the
//!    transaction coordinator gets every actor as a participant
//! 3. **Service Assembly** - the clients become the [`Collaborators`](crate::deletion::Collaborators)
//!    of the [`AccountDeleter`](crate::deletion::AccountDeleter)
//! 4. **Graceful Shutdown** - drop every client, then await the actor tasks
//!
//! ```rust
//! use gallery_accounts::config::GalleryConfig;
//! use gallery_accounts::deletion::DeleteAccountOptions;
//! use gallery_accounts::lifecycle::GallerySystem;
//! use gallery_accounts::model::AccountCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = GallerySystem::new(&GalleryConfig::default());
//!     system.accounts.create_account(AccountCreate::new("alice")).await?;
//!     system.accounts.create_account(AccountCreate::new("admin")).await?;
//!
//!     let result = system
//!         .deleter
//!         .delete_account_by_username("alice", "admin", &DeleteAccountOptions::new("requested"))
//!         .await?;
//!     assert_eq!(result.description, "The account:alice was deleted successfully.");
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of every channel (the deleter and the
//!    coordinator hold clones, so they are dropped too)
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for all actor tasks to finish
//!
//! Clones handed out to callers keep their actor alive; drop them before `shutdown`.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] installs the compact `tracing-subscriber` layer; see
//! [`resource_actor::tracing`] for the log fields each actor emits.

pub mod gallery_system;

pub use gallery_system::*;
pub use resource_actor::tracing::setup_tracing;
