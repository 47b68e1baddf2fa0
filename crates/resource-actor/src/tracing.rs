//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` fmt layer used by binaries built
//! on this framework.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** with the module prefix hidden (`with_target(false)`); actors log
//!   an `entity_type` field instead
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown, open transactions left at shutdown
//! - **Entity Operations**: Create, Get, Query, Update, Delete, Action with `%id` and `?scope`
//! - **Transactions**: Begin, Commit (with write count), Rollback (with undone count)
//! - **Errors**: rejected writes (`Locked`, unknown transaction) and failed hooks
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads and write scopes
//! RUST_LOG=resource_actor=debug,info cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"info"`) is used.
/// Calling it twice is harmless: the second installation attempt is ignored.
pub fn setup_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
