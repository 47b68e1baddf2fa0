//! Per-test fixtures. Every test builds its own system; nothing is shared.
#![allow(dead_code)]

use gallery_accounts::config::GalleryConfig;
use gallery_accounts::lifecycle::GallerySystem;
use gallery_accounts::model::{
    Account, AccountCreate, Credential, CredentialKind, NamespaceCreate, PackageCreate,
};
use gallery_accounts::services::{AccountStore, CredentialStore};
use resource_actor::WriteScope;

pub const SIGNATURE: &str = "Account deletion requested by the owner";

/// Routes logs to the test harness; `RUST_LOG=debug cargo test` shows them.
pub fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .with_target(false)
        .try_init();
}

pub async fn system() -> GallerySystem {
    init_logs();
    let system = GallerySystem::new(&GalleryConfig::default());
    system
        .accounts
        .create_account(AccountCreate::new("Admin").with_email("admin@example.com"))
        .await
        .unwrap();
    system
}

/// "TestUser" owns "TestPackage" (one version, no co-owners), reserves `testuser.`,
/// subscribes to "SecurityPolicy" and holds a password plus an API key.
pub async fn seed_test_user(system: &GallerySystem) -> Account {
    system
        .accounts
        .create_account(
            AccountCreate::new("TestUser")
                .with_email("testuser@example.com")
                .with_unconfirmed_email("testuser@new.example.com"),
        )
        .await
        .unwrap();
    system
        .packages
        .create_package(
            PackageCreate::new("TestPackage")
                .owned_by("TestUser")
                .with_version("1.0.0"),
        )
        .await
        .unwrap();

    let mut namespace = NamespaceCreate::prefix("TestUser.");
    namespace.owners.push("TestUser".into());
    system.namespaces.create_namespace(namespace).await.unwrap();

    system
        .accounts
        .subscribe("TestUser", "SecurityPolicy", WriteScope::Immediate)
        .await
        .unwrap();

    let account = account(system, "TestUser").await;
    for kind in [CredentialKind::Password, CredentialKind::ApiKey] {
        system
            .accounts
            .add_credential(&account, Credential::new(kind), WriteScope::Immediate)
            .await
            .unwrap();
    }
    self::account(system, "TestUser").await
}

pub async fn account(system: &GallerySystem, username: &str) -> Account {
    system
        .accounts
        .find_account(username)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("{username} should exist"))
}

pub async fn admin(system: &GallerySystem) -> Account {
    account(system, "Admin").await
}
