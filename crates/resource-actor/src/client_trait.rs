//! # ActorClient Trait
//!
//! Common interface for resource‑specific clients: default `get`, `list` and `delete`
//! methods built on top of a generic `ResourceClient`, with errors mapped into the
//! resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient, WriteScope};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Label { name: String }
/// #[derive(Debug)] struct LabelCreate;
/// #[derive(Debug)] struct LabelUpdate;
/// #[derive(Debug)] enum LabelAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct LabelError(String);
///
/// impl From<String> for LabelError {
///     fn from(s: String) -> Self { LabelError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Label {
///     type Id = String; type Create = LabelCreate; type Update = LabelUpdate;
///     type Action = LabelAction; type ActionResult = (); type Context = (); type Error = LabelError;
///     fn from_create_params(_: LabelCreate) -> Result<Self, Self::Error> { Ok(Self { name: "x".into() }) }
///     fn id(&self) -> String { self.name.clone() }
///     async fn on_update(&mut self, _: LabelUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: LabelAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct LabelClient { inner: ResourceClient<Label> }
///
/// #[async_trait]
/// impl ActorClient<Label> for LabelClient {
///     type Error = LabelError;
///     fn inner(&self) -> &ResourceClient<Label> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { LabelError(e.to_string()) }
/// }
///
/// async fn usage(client: LabelClient) {
///     // get(), list() and delete() are provided automatically!
///     let _ = client.get("x".into()).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity of this resource type.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(|_| true).await.map_err(Self::map_error)
    }

    /// Delete an entity by key.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id, scope: WriteScope) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id, scope).await.map_err(Self::map_error)
    }
}
