use serde::{Deserialize, Serialize};

/// What happens to a package registration left without owners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrphanPackagePolicy {
    /// Unlist every version of the orphaned registration.
    #[default]
    UnlistOrphans,
    /// Leave the versions listed.
    KeepOrphansListed,
}

/// How the deletion's writes are committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitMode {
    /// All writes form one transaction: a failure before the commit undoes every
    /// change.
    ///
    /// The commit itself is not atomic across collaborators. If one of them fails to
    /// commit, the others have already made their writes final and the caller still
    /// gets an error. The deletion may then be applied in full or in part; a retry
    /// reports it as already deleted once the account itself is deactivated.
    #[default]
    Transaction,
    /// Every collaborator call commits on its own. A failure part-way leaves the
    /// changes made so far in place; nothing is compensated.
    BestEffort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAccountOptions {
    /// Justification recorded in the audit log.
    pub signature: String,
    pub orphan_policy: OrphanPackagePolicy,
    pub commit_mode: CommitMode,
}

impl DeleteAccountOptions {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            ..Self::default()
        }
    }

    pub fn with_orphan_policy(mut self, orphan_policy: OrphanPackagePolicy) -> Self {
        self.orphan_policy = orphan_policy;
        self
    }

    pub fn with_commit_mode(mut self, commit_mode: CommitMode) -> Self {
        self.commit_mode = commit_mode;
        self
    }
}
