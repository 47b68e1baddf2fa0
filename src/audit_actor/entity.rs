use super::error::AuditError;
use crate::model::DeletionAuditRecord;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::convert::Infallible;
use uuid::Uuid;

#[async_trait]
impl ActorEntity for DeletionAuditRecord {
    type Id = Uuid;
    type Create = DeletionAuditRecord;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = AuditError;

    fn from_create_params(record: DeletionAuditRecord) -> Result<Self, AuditError> {
        if record.username.is_empty() || record.acting_admin.is_empty() {
            return Err(AuditError::ValidationError(
                "audit record needs both the deleted account and the acting admin".to_string(),
            ));
        }
        Ok(record)
    }

    fn id(&self) -> Uuid {
        self.id
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), AuditError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), AuditError> {
        match action {}
    }
}
