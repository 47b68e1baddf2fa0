use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionOutcome {
    Deleted,
    /// The account was already deactivated; nothing was changed.
    AlreadyDeleted,
}

/// What a deletion request did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionResult {
    pub account_name: String,
    pub outcome: DeletionOutcome,
    /// Human-readable summary, also stored in the audit record.
    pub description: String,
    /// Id of the audit record written for this deletion; `None` on the no-op path.
    pub audit_record: Option<Uuid>,
}

impl DeletionResult {
    pub(crate) fn deleted(account_name: &str, audit_record: Uuid) -> Self {
        Self {
            account_name: account_name.to_string(),
            outcome: DeletionOutcome::Deleted,
            description: deleted_description(account_name),
            audit_record: Some(audit_record),
        }
    }

    pub(crate) fn already_deleted(account_name: &str) -> Self {
        Self {
            account_name: account_name.to_string(),
            outcome: DeletionOutcome::AlreadyDeleted,
            description: format!(
                "The account:{account_name} was already deleted. No action was performed."
            ),
            audit_record: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.outcome == DeletionOutcome::AlreadyDeleted
    }
}

pub(crate) fn deleted_description(account_name: &str) -> String {
    format!("The account:{account_name} was deleted successfully.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            DeletionResult::already_deleted("TestUser").description,
            "The account:TestUser was already deleted. No action was performed."
        );
        let deleted = DeletionResult::deleted("TestUser", Uuid::nil());
        assert_eq!(deleted.description, "The account:TestUser was deleted successfully.");
        assert!(!deleted.is_noop());
    }
}
