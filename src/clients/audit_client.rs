//! # Audit Client
//!
//! Append-only access to the deletion audit log.
use crate::audit_actor::AuditError;
use crate::clients::entity_error;
use crate::model::DeletionAuditRecord;
use crate::services::AuditLog;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, WriteScope};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Client for interacting with the Audit actor.
#[derive(Clone)]
pub struct AuditClient {
    inner: ResourceClient<DeletionAuditRecord>,
}

impl AuditClient {
    pub fn new(inner: ResourceClient<DeletionAuditRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<DeletionAuditRecord> for AuditClient {
    type Error = AuditError;

    fn inner(&self) -> &ResourceClient<DeletionAuditRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<AuditError>(e) {
            Ok(err) => err,
            Err(FrameworkError::AlreadyExists(id)) => AuditError::AlreadyExists(id),
            Err(other) => AuditError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl AuditLog for AuditClient {
    #[instrument(skip(self, record), fields(record_id = %record.id, username = %record.username))]
    async fn insert_audit_record(
        &self,
        record: DeletionAuditRecord,
        scope: WriteScope,
    ) -> Result<Uuid, AuditError> {
        debug!("Sending request");
        self.inner
            .create(record, scope)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn records_for(&self, username: &str) -> Result<Vec<DeletionAuditRecord>, AuditError> {
        debug!("Sending request");
        let username = username.to_string();
        let mut records = self
            .inner
            .query(move |r: &DeletionAuditRecord| r.username == username)
            .await
            .map_err(Self::map_error)?;
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn test_records_are_filtered_by_account() {
        let (actor, client) = crate::audit_actor::new(8);
        tokio::spawn(actor.run(()));

        let first = DeletionAuditRecord::new("alice", "admin", "GDPR request", "deleted");
        let other = DeletionAuditRecord::new("bob", "admin", "spam", "deleted");
        let id = client
            .insert_audit_record(first.clone(), WriteScope::Immediate)
            .await
            .unwrap();
        client
            .insert_audit_record(other, WriteScope::Immediate)
            .await
            .unwrap();

        assert_eq!(id, first.id);
        assert_eq!(client.records_for("alice").await.unwrap(), vec![first]);
        assert!(client.records_for("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_record_is_rejected() {
        let (actor, client) = crate::audit_actor::new(8);
        tokio::spawn(actor.run(()));

        let record = DeletionAuditRecord::new("alice", "admin", "sig", "deleted");
        client
            .insert_audit_record(record.clone(), WriteScope::Immediate)
            .await
            .unwrap();
        let again = client
            .insert_audit_record(record, WriteScope::Immediate)
            .await;
        assert!(matches!(again, Err(AuditError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced() {
        let mut mock = MockClient::<DeletionAuditRecord>::new();
        mock.expect_create().return_err(FrameworkError::ActorClosed);
        let client = AuditClient::new(mock.client());

        let result = client
            .insert_audit_record(
                DeletionAuditRecord::new("alice", "admin", "sig", "deleted"),
                WriteScope::Immediate,
            )
            .await;
        assert!(matches!(result, Err(AuditError::ActorCommunicationError(_))));
        mock.verify();
    }
}
