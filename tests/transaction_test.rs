//! Failure injection: what a deletion leaves behind when a collaborator fails part-way.

mod common;

use async_trait::async_trait;
use common::{account, admin, seed_test_user, system, SIGNATURE};
use gallery_accounts::account_actor::AccountError;
use gallery_accounts::audit_actor::AuditError;
use gallery_accounts::clients::AuditClient;
use gallery_accounts::deletion::{
    AccountDeleter, Collaborators, CommitMode, DeleteAccountOptions, DeletionError,
};
use gallery_accounts::lifecycle::GallerySystem;
use gallery_accounts::model::{Account, Credential, DeletionAuditRecord};
use gallery_accounts::services::{AuditLog, CredentialStore, PackageDirectory};
use resource_actor::mock::MockClient;
use resource_actor::{
    ActorClient, FrameworkError, TransactionCoordinator, TransactionParticipant, WriteScope,
};
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

// --- Test doubles ---

/// An audit log whose storage is down.
struct UnavailableAuditLog;

#[async_trait]
impl AuditLog for UnavailableAuditLog {
    async fn insert_audit_record(
        &self,
        _record: DeletionAuditRecord,
        _scope: WriteScope,
    ) -> Result<Uuid, AuditError> {
        Err(AuditError::ActorCommunicationError("audit storage unavailable".into()))
    }

    async fn records_for(&self, _username: &str) -> Result<Vec<DeletionAuditRecord>, AuditError> {
        Ok(Vec::new())
    }
}

/// Removes the first credential through the real store, then fails.
struct FlakyCredentialStore {
    real: Arc<dyn CredentialStore>,
    calls: std::sync::Mutex<usize>,
}

#[async_trait]
impl CredentialStore for FlakyCredentialStore {
    async fn add_credential(
        &self,
        account: &Account,
        credential: Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        self.real.add_credential(account, credential, scope).await
    }

    async fn remove_credential(
        &self,
        account: &Account,
        credential: &Credential,
        scope: WriteScope,
    ) -> Result<(), AccountError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call > 1 {
            return Err(AccountError::ActorCommunicationError("credential store timed out".into()));
        }
        self.real.remove_credential(account, credential, scope).await
    }
}

fn deleter_with(system: &GallerySystem, replace: impl FnOnce(&mut Collaborators)) -> AccountDeleter {
    let mut collaborators = system.collaborators();
    replace(&mut collaborators);
    AccountDeleter::new(collaborators)
}

/// Everything the "TestUser" fixture owns is still in place.
async fn assert_untouched(system: &GallerySystem, before: &Account) {
    assert_eq!(&account(system, "TestUser").await, before);

    let package = system
        .packages
        .find_package("TestPackage")
        .await
        .unwrap()
        .unwrap();
    assert!(package.owners.contains("TestUser"));
    assert_eq!(package.listed_versions().count(), 1);

    let namespace = system
        .namespaces
        .get("testuser.".into())
        .await
        .unwrap()
        .expect("namespace should not be released");
    assert!(namespace.owners.contains("TestUser"));
}

// --- Tests ---

#[tokio::test]
async fn test_audit_failure_rolls_back_every_step() {
    let system = system().await;
    let before = seed_test_user(&system).await;
    let deleter = deleter_with(&system, |c| c.audit = Arc::new(UnavailableAuditLog));

    let result = deleter
        .delete_account(
            Some(&before),
            Some(&admin(&system).await),
            &DeleteAccountOptions::new(SIGNATURE),
        )
        .await;

    assert!(matches!(result, Err(DeletionError::Audit(_))));
    assert_untouched(&system, &before).await;

    // Locks were released: the regular deleter can now finish the job.
    let retry = system
        .deleter
        .delete_account(Some(&before), Some(&admin(&system).await), &DeleteAccountOptions::new(SIGNATURE))
        .await
        .expect("retry should succeed");
    assert!(!retry.is_noop());
    assert!(account(&system, "TestUser").await.is_deleted);
}

#[tokio::test]
async fn test_best_effort_failure_leaves_partial_state() {
    let system = system().await;
    let before = seed_test_user(&system).await;
    let deleter = deleter_with(&system, |c| c.audit = Arc::new(UnavailableAuditLog));

    let options = DeleteAccountOptions::new(SIGNATURE).with_commit_mode(CommitMode::BestEffort);
    let result = deleter
        .delete_account(Some(&before), Some(&admin(&system).await), &options)
        .await;
    assert!(matches!(result, Err(DeletionError::Audit(_))));

    // Every step before the audit write stayed applied.
    let after = account(&system, "TestUser").await;
    assert!(after.is_deleted);
    assert!(after.credentials.is_empty());
    assert!(after.policy_subscriptions.is_empty());
    let package = system
        .packages
        .find_package("TestPackage")
        .await
        .unwrap()
        .unwrap();
    assert!(package.is_orphaned());
    assert_eq!(package.listed_versions().count(), 0);
    assert!(system.audit.records_for("TestUser").await.unwrap().is_empty());

    // A retry sees the deactivated account and does nothing.
    let retry = system
        .deleter
        .delete_account_by_username("TestUser", "Admin", &options)
        .await
        .unwrap();
    assert!(retry.is_noop());
}

#[tokio::test]
async fn test_credential_failure_midway_restores_earlier_removals() {
    let system = system().await;
    let before = seed_test_user(&system).await;
    let real: Arc<dyn CredentialStore> = Arc::new(system.accounts.clone());
    let deleter = deleter_with(&system, |c| {
        c.credentials = Arc::new(FlakyCredentialStore {
            real,
            calls: std::sync::Mutex::new(0),
        })
    });

    let result = deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await;

    assert!(matches!(
        result,
        Err(DeletionError::Account(AccountError::ActorCommunicationError(_)))
    ));
    // The first credential was removed inside the transaction and came back on rollback.
    assert_eq!(account(&system, "TestUser").await.credentials.len(), 2);
    assert_untouched(&system, &before).await;
}

/// The audit store is a mock participant: it joins the transaction, refuses the write,
/// and is asked to roll back like everyone else.
#[tokio::test]
async fn test_mock_audit_participant_sees_begin_and_rollback() {
    let system = system().await;
    let before = seed_test_user(&system).await;

    let mut audit_mock = MockClient::<DeletionAuditRecord>::new();
    audit_mock.expect_begin().return_ok(());
    audit_mock
        .expect_create()
        .return_err(FrameworkError::ActorClosed);
    audit_mock.expect_rollback().return_ok(());

    let participants: Vec<Arc<dyn TransactionParticipant>> = vec![
        Arc::new(system.accounts.inner().clone()),
        Arc::new(system.packages.inner().clone()),
        Arc::new(system.namespaces.inner().clone()),
        Arc::new(audit_mock.client()),
    ];
    let audit_client = AuditClient::new(audit_mock.client());
    let deleter = deleter_with(&system, |c| {
        c.audit = Arc::new(audit_client);
        c.transactions = Arc::new(TransactionCoordinator::new(participants));
    });

    let result = deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await;

    assert!(matches!(
        result,
        Err(DeletionError::Audit(AuditError::ActorCommunicationError(_)))
    ));
    audit_mock.verify();
    assert_untouched(&system, &before).await;
}

#[tokio::test]
async fn test_failed_begin_changes_nothing() {
    let system = system().await;
    let before = seed_test_user(&system).await;

    let mut refusing = MockClient::<DeletionAuditRecord>::new();
    refusing.expect_begin().return_err(FrameworkError::ActorClosed);
    let participants: Vec<Arc<dyn TransactionParticipant>> = vec![
        Arc::new(system.accounts.inner().clone()),
        Arc::new(refusing.client()),
    ];
    let deleter = deleter_with(&system, |c| {
        c.transactions = Arc::new(TransactionCoordinator::new(participants));
    });

    let result = deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await;

    assert!(matches!(
        result,
        Err(DeletionError::Transaction(FrameworkError::ActorClosed))
    ));
    refusing.verify();
    assert_untouched(&system, &before).await;
}

/// A concurrent transaction holding the account makes the deletion fail fast, before
/// anything is written.
#[tokio::test]
async fn test_locked_account_fails_fast_without_changes() {
    let system = system().await;
    let before = seed_test_user(&system).await;

    let other = system.transactions.begin().await.unwrap();
    system
        .accounts
        .subscribe("TestUser", "BetaFeatures", other.scope())
        .await
        .unwrap();

    for mode in [CommitMode::Transaction, CommitMode::BestEffort] {
        let options = DeleteAccountOptions::new(SIGNATURE).with_commit_mode(mode);
        let result = system
            .deleter
            .delete_account_by_username("TestUser", "Admin", &options)
            .await;
        assert!(matches!(
            result,
            Err(DeletionError::Account(AccountError::Locked(_)))
        ));
    }

    other.rollback().await.unwrap();
    assert_untouched(&system, &before).await;

    let retry = system
        .deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await
        .unwrap();
    assert!(!retry.is_noop());
}

/// Holds the audit write until released, then fails it.
struct StalledAuditLog {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl AuditLog for StalledAuditLog {
    async fn insert_audit_record(
        &self,
        _record: DeletionAuditRecord,
        _scope: WriteScope,
    ) -> Result<Uuid, AuditError> {
        self.entered.notify_one();
        self.release.notified().await;
        Err(AuditError::ActorCommunicationError("audit storage unavailable".into()))
    }

    async fn records_for(&self, _username: &str) -> Result<Vec<DeletionAuditRecord>, AuditError> {
        Ok(Vec::new())
    }
}

/// A retry sent while the first request is still running must not be reported as
/// already deleted: the first request may still roll back.
#[tokio::test]
async fn test_retry_during_inflight_deletion_is_not_a_noop() {
    let system = system().await;
    let before = seed_test_user(&system).await;
    let admin = admin(&system).await;

    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let stalled = deleter_with(&system, |c| {
        c.audit = Arc::new(StalledAuditLog {
            entered: entered.clone(),
            release: release.clone(),
        })
    });
    let first = {
        let (user, admin) = (before.clone(), admin.clone());
        tokio::spawn(async move {
            stalled
                .delete_account(Some(&user), Some(&admin), &DeleteAccountOptions::new(SIGNATURE))
                .await
        })
    };
    entered.notified().await;

    // The first deletion has scrubbed the account but not committed.
    let second = system
        .deleter
        .delete_account(Some(&before), Some(&admin), &DeleteAccountOptions::new(SIGNATURE))
        .await;
    assert!(matches!(
        second,
        Err(DeletionError::Account(AccountError::Locked(_)))
    ));

    release.notify_one();
    let first = first.await.unwrap();
    assert!(matches!(first, Err(DeletionError::Audit(_))));
    assert!(!account(&system, "TestUser").await.is_deleted);
    assert_untouched(&system, &before).await;

    let retry = system
        .deleter
        .delete_account(Some(&before), Some(&admin), &DeleteAccountOptions::new(SIGNATURE))
        .await
        .unwrap();
    assert!(!retry.is_noop());
}

/// A participant that fails to commit surfaces as an error even though the others have
/// already made the deletion final.
#[tokio::test]
async fn test_commit_failure_is_reported_after_writes_are_final() {
    let system = system().await;
    seed_test_user(&system).await;

    let mut late = MockClient::<DeletionAuditRecord>::new();
    late.expect_begin().return_ok(());
    late.expect_commit().return_err(FrameworkError::ActorClosed);
    let participants: Vec<Arc<dyn TransactionParticipant>> = vec![
        Arc::new(system.accounts.inner().clone()),
        Arc::new(system.packages.inner().clone()),
        Arc::new(system.namespaces.inner().clone()),
        Arc::new(system.audit.inner().clone()),
        Arc::new(late.client()),
    ];
    let deleter = deleter_with(&system, |c| {
        c.transactions = Arc::new(TransactionCoordinator::new(participants));
    });

    let result = deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await;

    assert!(matches!(
        result,
        Err(DeletionError::Transaction(FrameworkError::ActorClosed))
    ));
    late.verify();
    assert!(account(&system, "TestUser").await.is_deleted);
    assert_eq!(system.audit.records_for("TestUser").await.unwrap().len(), 1);

    // The retry sees the deactivated account.
    let retry = system
        .deleter
        .delete_account_by_username("TestUser", "Admin", &DeleteAccountOptions::new(SIGNATURE))
        .await
        .unwrap();
    assert!(retry.is_noop());
}
