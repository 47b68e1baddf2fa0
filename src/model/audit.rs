use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one account deletion. Written once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionAuditRecord {
    pub id: Uuid,
    /// The deleted account.
    pub username: String,
    pub acting_admin: String,
    /// Justification supplied by the admin.
    pub signature: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl DeletionAuditRecord {
    pub fn new(
        username: impl Into<String>,
        acting_admin: impl Into<String>,
        signature: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            acting_admin: acting_admin.into(),
            signature: signature.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
