//! Configuration for the gallery account services
//!
//! CLI arguments and environment variable handling using clap. [`Args`] is what the
//! binary parses; [`GalleryConfig`] is what [`GallerySystem`](crate::lifecycle::GallerySystem)
//! is built from.

use crate::deletion::{CommitMode, DeleteAccountOptions, OrphanPackagePolicy};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Runtime settings for the actor system and the default deletion options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Channel capacity of every resource actor.
    pub buffer_size: usize,
    /// Delete a reserved namespace once its last owner is detached.
    pub release_orphaned_namespaces: bool,
    pub deletion: DeleteAccountOptions,
    /// Default `tracing` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            release_orphaned_namespaces: true,
            deletion: DeleteAccountOptions::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Gallery account services - deletes accounts across the package gallery stores
#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-accounts")]
#[command(about = "Deactivates gallery accounts and cleans up everything they own")]
pub struct Args {
    /// Channel capacity of each resource actor
    #[arg(long, env = "GALLERY_BUFFER_SIZE", default_value_t = 32)]
    pub buffer_size: usize,

    /// Keep reserved namespaces that lose their last owner
    #[arg(long, env = "GALLERY_KEEP_ORPHANED_NAMESPACES")]
    pub keep_orphaned_namespaces: bool,

    /// Leave the versions of orphaned packages listed
    #[arg(long, env = "GALLERY_KEEP_ORPHANS_LISTED")]
    pub keep_orphans_listed: bool,

    /// Commit every step on its own instead of one transaction.
    /// A failure part-way leaves earlier steps applied.
    #[arg(long, env = "GALLERY_BEST_EFFORT")]
    pub best_effort: bool,

    /// Justification recorded in the audit log
    #[arg(long, env = "GALLERY_DELETE_SIGNATURE", default_value = "Deleted by administrator")]
    pub signature: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl From<Args> for GalleryConfig {
    fn from(args: Args) -> Self {
        let orphan_policy = if args.keep_orphans_listed {
            OrphanPackagePolicy::KeepOrphansListed
        } else {
            OrphanPackagePolicy::UnlistOrphans
        };
        let commit_mode = if args.best_effort {
            CommitMode::BestEffort
        } else {
            CommitMode::Transaction
        };
        Self {
            buffer_size: args.buffer_size.max(1),
            release_orphaned_namespaces: !args.keep_orphaned_namespaces,
            deletion: DeleteAccountOptions::new(args.signature)
                .with_orphan_policy(orphan_policy)
                .with_commit_mode(commit_mode),
            log_level: args.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_onto_config() {
        let args = Args::parse_from([
            "gallery-accounts",
            "--buffer-size",
            "8",
            "--keep-orphans-listed",
            "--best-effort",
            "--signature",
            "Spam account",
        ]);
        let config = GalleryConfig::from(args);

        assert_eq!(config.buffer_size, 8);
        assert!(config.release_orphaned_namespaces);
        assert_eq!(config.deletion.signature, "Spam account");
        assert_eq!(
            config.deletion.orphan_policy,
            OrphanPackagePolicy::KeepOrphansListed
        );
        assert_eq!(config.deletion.commit_mode, CommitMode::BestEffort);
    }

    #[test]
    fn test_zero_buffer_is_clamped() {
        let args = Args::parse_from(["gallery-accounts", "--buffer-size", "0"]);
        assert_eq!(GalleryConfig::from(args).buffer_size, 1);
    }
}
