//! # Transactions Across Actors
//!
//! Every `ResourceActor` keeps an undo journal per open transaction. A write issued with
//! [`WriteScope::Deferred`] records the entity's prior value and locks the entity for that
//! transaction; `Commit` drops the journal and the locks, `Rollback` replays the journal
//! backwards and then releases the locks.
//!
//! [`TransactionCoordinator`] fans the control messages out to every registered
//! participant and hands back a [`Transaction`] guard:
//!
//! ```rust,ignore
//! let txn = coordinator.begin().await?;
//! client.perform_action(id, action, txn.scope()).await?;
//! txn.commit().await?;
//! ```
//!
//! A guard dropped without `commit` or `rollback` rolls back on a spawned task, so the
//! locks are released on every exit path, including `?` and panics.
//!
//! ## Isolation
//!
//! Writes are applied to the store eagerly, so readers see deferred writes before commit.
//! Conflicting writers fail immediately with [`FrameworkError::Locked`]; there is no
//! waiting and no retry.

use crate::error::FrameworkError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Identifier of one transaction, shared by all participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxnId(Uuid);

impl TxnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TxnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn_{}", self.0.simple())
    }
}

/// How a write is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteScope {
    /// The write is final once the actor answers.
    Immediate,
    /// The write belongs to an open transaction and is undone if it rolls back.
    Deferred(TxnId),
}

impl WriteScope {
    pub fn txn(&self) -> Option<TxnId> {
        match self {
            WriteScope::Immediate => None,
            WriteScope::Deferred(txn) => Some(*txn),
        }
    }
}

/// Anything that can take part in a transaction (usually a `ResourceClient`).
#[async_trait]
pub trait TransactionParticipant: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn begin(&self, txn: TxnId) -> Result<(), FrameworkError>;

    async fn commit(&self, txn: TxnId) -> Result<(), FrameworkError>;

    async fn rollback(&self, txn: TxnId) -> Result<(), FrameworkError>;
}

type Participants = Arc<Vec<Arc<dyn TransactionParticipant>>>;

/// Opens transactions spanning a fixed set of participants.
#[derive(Clone, Default)]
pub struct TransactionCoordinator {
    participants: Participants,
}

impl TransactionCoordinator {
    pub fn new(participants: Vec<Arc<dyn TransactionParticipant>>) -> Self {
        Self {
            participants: Arc::new(participants),
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Opens a transaction on every participant.
    ///
    /// If one participant refuses, the ones already opened are rolled back before the
    /// error is returned.
    pub async fn begin(&self) -> Result<Transaction, FrameworkError> {
        let txn = TxnId::new();
        for (opened, participant) in self.participants.iter().enumerate() {
            if let Err(e) = participant.begin(txn).await {
                warn!(%txn, participant = participant.name(), error = %e, "Begin failed");
                for earlier in self.participants.iter().take(opened) {
                    if let Err(e) = earlier.rollback(txn).await {
                        error!(%txn, participant = earlier.name(), error = %e, "Rollback after failed begin failed");
                    }
                }
                return Err(e);
            }
        }
        debug!(%txn, participants = self.participants.len(), "Transaction started");
        Ok(Transaction {
            id: txn,
            participants: self.participants.clone(),
            open: true,
        })
    }
}

/// Guard for one open transaction.
pub struct Transaction {
    id: TxnId,
    participants: Participants,
    open: bool,
}

impl Transaction {
    pub fn id(&self) -> TxnId {
        self.id
    }

    /// The scope to pass to every write that belongs to this transaction.
    pub fn scope(&self) -> WriteScope {
        WriteScope::Deferred(self.id)
    }

    /// Makes every deferred write final.
    ///
    /// Commit only discards journals, so a failure here (a participant that has shut
    /// down) cannot undo writes that other participants already made final.
    pub async fn commit(mut self) -> Result<(), FrameworkError> {
        self.open = false;
        let txn = self.id;
        let mut first_error = None;
        for participant in self.participants.iter() {
            if let Err(e) = participant.commit(txn).await {
                error!(%txn, participant = participant.name(), error = %e, "Commit failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                info!(%txn, "Transaction committed");
                Ok(())
            }
        }
    }

    /// Undoes every deferred write made under this transaction.
    ///
    /// All participants are asked to roll back even if one of them fails; the first
    /// error is returned.
    pub async fn rollback(mut self) -> Result<(), FrameworkError> {
        self.open = false;
        rollback_all(self.id, &self.participants).await
    }
}

async fn rollback_all(txn: TxnId, participants: &Participants) -> Result<(), FrameworkError> {
    let mut first_error = None;
    for participant in participants.iter().rev() {
        if let Err(e) = participant.rollback(txn).await {
            error!(%txn, participant = participant.name(), error = %e, "Rollback failed");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => {
            info!(%txn, "Transaction rolled back");
            Ok(())
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let txn = self.id;
        let participants = self.participants.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(%txn, "Transaction dropped while open, rolling back");
                handle.spawn(async move {
                    let _ = rollback_all(txn, &participants).await;
                });
            }
            Err(_) => error!(%txn, "Transaction dropped outside a runtime, cannot roll back"),
        }
    }
}
