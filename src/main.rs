//! # Gallery Accounts Demo
//!
//! Seeds a small gallery (an admin, a user with a package, a reserved namespace, a policy
//! subscription and an API key), deletes the user, and prints what is left.
//!
//! Settings come from [`Args`](gallery_accounts::config::Args) (flags or `GALLERY_*`
//! environment variables).

use clap::Parser;
use gallery_accounts::config::{Args, GalleryConfig};
use gallery_accounts::lifecycle::{setup_tracing, GallerySystem};
use gallery_accounts::model::{AccountCreate, Credential, CredentialKind, NamespaceCreate, PackageCreate, Scope};
use gallery_accounts::services::{AccountStore, AuditLog, CredentialStore, PackageDirectory};
use resource_actor::WriteScope;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = GalleryConfig::from(Args::parse());
    setup_tracing(&config.log_level);

    info!(?config, "Starting gallery account services");
    let system = GallerySystem::new(&config);

    let span = tracing::info_span!("seeding");
    async {
        seed(&system).await
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("account_deletion");
    let result = async {
        system
            .deleter
            .delete_account_by_username("TestUser", "Admin", &config.deletion)
            .await
    }
    .instrument(span)
    .await;

    match result {
        Ok(result) => info!(description = %result.description, "Deletion finished"),
        Err(e) => error!(error = %e, "Deletion failed"),
    }

    let account = system
        .accounts
        .find_account("TestUser")
        .await
        .map_err(|e| e.to_string())?;
    let package = system
        .packages
        .find_package("TestPackage")
        .await
        .map_err(|e| e.to_string())?;
    let records = system
        .audit
        .records_for("TestUser")
        .await
        .map_err(|e| e.to_string())?;
    info!(?account, "Account after deletion");
    info!(?package, "Package after deletion");
    info!(audit_records = records.len(), "Audit log");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn seed(system: &GallerySystem) -> Result<(), String> {
    system
        .accounts
        .create_account(AccountCreate::new("Admin").with_email("admin@example.com"))
        .await
        .map_err(|e| e.to_string())?;
    system
        .accounts
        .create_account(
            AccountCreate::new("TestUser")
                .with_email("testuser@example.com")
                .with_unconfirmed_email("testuser@new.example.com"),
        )
        .await
        .map_err(|e| e.to_string())?;

    system
        .packages
        .create_package(
            PackageCreate::new("TestPackage")
                .owned_by("TestUser")
                .with_version("1.0.0"),
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut namespace = NamespaceCreate::prefix("TestUser.");
    namespace.owners.push("TestUser".to_string());
    system
        .namespaces
        .create_namespace(namespace)
        .await
        .map_err(|e| e.to_string())?;

    system
        .accounts
        .subscribe("TestUser", "SecurityPolicy", WriteScope::Immediate)
        .await
        .map_err(|e| e.to_string())?;

    let account = system
        .accounts
        .find_account("TestUser")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("TestUser was not created")?;
    let api_key = Credential::new(CredentialKind::ApiKey)
        .with_description("Push key")
        .with_scope(Scope {
            owner: Some("TestUser".to_string()),
            subject: "TestUser.*".to_string(),
            allowed_action: "package:push".to_string(),
        });
    system
        .accounts
        .add_credential(&account, api_key, WriteScope::Immediate)
        .await
        .map_err(|e| e.to_string())?;

    info!("Gallery seeded");
    Ok(())
}
