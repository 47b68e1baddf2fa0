//! Pure data structures managed by the resource actors.
//!
//! Each entity implements [`ActorEntity`](resource_actor::ActorEntity) in its actor module
//! (e.g. [`account_actor::entity`](crate::account_actor::entity)).

pub mod account;
pub mod audit;
pub mod namespace;
pub mod package;

pub use account::*;
pub use audit::*;
pub use namespace::*;
pub use package::*;
