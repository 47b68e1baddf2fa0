use crate::clients::{AccountClient, AuditClient, NamespaceClient, PackageClient};
use crate::config::GalleryConfig;
use crate::deletion::{AccountDeleter, Collaborators};
use resource_actor::{ActorClient, TransactionCoordinator, TransactionParticipant};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime that owns every resource actor.
///
/// `GallerySystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: The namespace registry writes through the account client
/// - **Transactions**: One [`TransactionCoordinator`] spanning all four actors
///
/// # Example
///
/// ```ignore
/// let system = GallerySystem::new(&GalleryConfig::default());
/// system.accounts.create_account(AccountCreate::new("alice")).await?;
/// let result = system.deleter.delete_account_by_username("alice", "admin", &options).await?;
/// system.shutdown().await?;
/// ```
pub struct GallerySystem {
    pub accounts: AccountClient,
    pub packages: PackageClient,
    pub namespaces: NamespaceClient,
    pub audit: AuditClient,
    pub transactions: TransactionCoordinator,
    /// Deleter wired to the clients above.
    pub deleter: AccountDeleter,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl GallerySystem {
    /// Creates and starts every actor. Must be called inside a Tokio runtime.
    pub fn new(config: &GalleryConfig) -> Self {
        let buffer_size = config.buffer_size.max(1);

        // 1. Create actors
        let (account_actor, accounts) = crate::account_actor::new(buffer_size);
        let (package_actor, packages) = crate::package_actor::new(buffer_size);
        let (namespace_actor, namespaces) = crate::namespace_actor::new(
            buffer_size,
            accounts.clone(),
            config.release_orphaned_namespaces,
        );
        let (audit_actor, audit) = crate::audit_actor::new(buffer_size);

        // 2. Start actors (no entity needs a context)
        let handles = vec![
            tokio::spawn(account_actor.run(())),
            tokio::spawn(package_actor.run(())),
            tokio::spawn(namespace_actor.run(())),
            tokio::spawn(audit_actor.run(())),
        ];

        // 3. Every actor takes part in deletion transactions
        let participants: Vec<Arc<dyn TransactionParticipant>> = vec![
            Arc::new(accounts.inner().clone()),
            Arc::new(packages.inner().clone()),
            Arc::new(namespaces.inner().clone()),
            Arc::new(audit.inner().clone()),
        ];
        let transactions = TransactionCoordinator::new(participants);

        let deleter = AccountDeleter::new(Self::wire(
            &accounts,
            &packages,
            &namespaces,
            &audit,
            &transactions,
        ));
        info!(
            buffer_size,
            participants = transactions.participant_count(),
            "Gallery system started"
        );

        Self {
            accounts,
            packages,
            namespaces,
            audit,
            transactions,
            deleter,
            handles,
        }
    }

    /// The actor-backed collaborators, for building a deleter with some of them replaced.
    pub fn collaborators(&self) -> Collaborators {
        Self::wire(
            &self.accounts,
            &self.packages,
            &self.namespaces,
            &self.audit,
            &self.transactions,
        )
    }

    fn wire(
        accounts: &AccountClient,
        packages: &PackageClient,
        namespaces: &NamespaceClient,
        audit: &AuditClient,
        transactions: &TransactionCoordinator,
    ) -> Collaborators {
        Collaborators {
            accounts: Arc::new(accounts.clone()),
            packages: Arc::new(packages.clone()),
            ownership: Arc::new(packages.clone()),
            namespaces: Arc::new(namespaces.clone()),
            subscriptions: Arc::new(accounts.clone()),
            credentials: Arc::new(accounts.clone()),
            audit: Arc::new(audit.clone()),
            transactions: Arc::new(transactions.clone()),
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client held by the system (including the deleter's and the
    /// coordinator's clones), then waits for the actor tasks.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let Self {
            accounts,
            packages,
            namespaces,
            audit,
            transactions,
            deleter,
            handles,
        } = self;

        // Closing the last sender of a channel ends that actor's loop.
        drop(deleter);
        drop(transactions);
        drop(namespaces);
        drop(accounts);
        drop(packages);
        drop(audit);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
