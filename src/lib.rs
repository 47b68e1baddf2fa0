//! # Gallery Accounts
//!
//! > **Account deactivation for a package gallery, on top of resource actors.**
//!
//! A package gallery keeps state about an account in several places: the package
//! registrations it owns, the namespaces it reserved, its policy subscriptions, its
//! credentials, and the account record itself. Deleting the account means touching all
//! of them consistently and leaving an audit trail. That workflow lives in
//! [`deletion::AccountDeleter`].
//!
//! ## 🏗️ Design
//!
//! ### Collaborators as capabilities
//! The deleter never sees storage. It talks to narrow traits ([`services`]) such as
//! [`AccountStore`](services::AccountStore) or [`AuditLog`](services::AuditLog), so a test
//! can replace any one of them with a double.
//!
//! ### Resource actors underneath
//! The shipped implementation of those traits is a set of
//! [`ResourceActor`](resource_actor::ResourceActor)s, one per entity kind, each processing
//! its messages sequentially (no locks needed for internal state).
//!
//! ### Explicit transactions
//! Every write carries a [`WriteScope`](resource_actor::WriteScope). In transactional mode
//! the deleter opens a [`Transaction`](resource_actor::Transaction) across all actors,
//! passes its scope to every call, and commits or rolls back. A transaction that is
//! dropped while still open rolls back, so no exit path leaks locks.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - accounts, credentials, package registrations, reserved namespaces, audit records
//! - [`account_actor`], [`package_actor`], [`namespace_actor`], [`audit_actor`] -
//!   [`ActorEntity`](resource_actor::ActorEntity) implementations, actions and errors
//! - [`clients`] - typed clients; they implement the [`services`] traits
//! - [`deletion`] - the orchestrator, its options, result and error types
//! - [`lifecycle`] - [`GallerySystem`](lifecycle::GallerySystem): start, wire, shut down
//! - [`config`] - [`GalleryConfig`](config::GalleryConfig) and the clap [`Args`](config::Args)
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Commit step by step instead of one transaction
//! cargo run -- --best-effort --signature "Spam account"
//! ```

pub mod account_actor;
pub mod audit_actor;
pub mod clients;
pub mod config;
pub mod deletion;
pub mod lifecycle;
pub mod model;
pub mod namespace_actor;
pub mod package_actor;
pub mod services;
