//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from
//! a queue of expectations instead of a running actor. It lets you write fast,
//! deterministic tests for code that sits *on top of* clients (typed client wrappers,
//! orchestrators) and inject failures that are hard to reproduce with real state.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError, TransactionParticipant, TxnId, WriteScope};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Note { id: String }
//! #[derive(Debug)] struct NoteCreate(String);
//! #[derive(Debug)] struct NoteUpdate;
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = String; type Create = NoteCreate; type Update = NoteUpdate;
//!     type Action = NoteAction; type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn from_create_params(p: NoteCreate) -> Result<Self, Self::Error> { Ok(Self { id: p.0 }) }
//!     fn id(&self) -> String { self.id.clone() }
//!     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     let client = mock.client();
//!
//!     // The store accepts the transaction but fails the write.
//!     mock.expect_begin().return_ok(());
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let txn = TxnId::new();
//!     client.begin(txn).await.unwrap();
//!     let result = client.create(NoteCreate("n".into()), WriteScope::Deferred(txn)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation panics the mock task; the caller then sees
//! [`FrameworkError::ActorDropped`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Transaction control message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Begin,
    Commit,
    Rollback,
}

/// An expected request to the mock client and the response to give.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
    Control {
        kind: Control,
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Account>::new();
/// mock.expect_get("alice".to_string()).return_ok(Some(account));
/// mock.expect_action("alice".to_string()).return_err(FrameworkError::ActorClosed);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Query { respond_to, .. },
                        Some(Expectation::Query { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Begin { respond_to, .. },
                        Some(Expectation::Control {
                            kind: Control::Begin,
                            response,
                        }),
                    )
                    | (
                        ResourceRequest::Commit { respond_to, .. },
                        Some(Expectation::Control {
                            kind: Control::Commit,
                            response,
                        }),
                    )
                    | (
                        ResourceRequest::Rollback { respond_to, .. },
                        Some(Expectation::Control {
                            kind: Control::Rollback,
                            response,
                        }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, _id: T::Id) -> ResponseBuilder<T, Option<T>> {
        ResponseBuilder::new(&self.expectations, |response| Expectation::Get { response })
    }

    /// Expects a `query` operation.
    pub fn expect_query(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder::new(&self.expectations, |response| Expectation::Query { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ResponseBuilder<T, T::Id> {
        ResponseBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> ResponseBuilder<T, T::ActionResult> {
        ResponseBuilder::new(&self.expectations, |response| Expectation::Action { response })
    }

    pub fn expect_begin(&mut self) -> ResponseBuilder<T, ()> {
        self.expect_control(Control::Begin)
    }

    pub fn expect_commit(&mut self) -> ResponseBuilder<T, ()> {
        self.expect_control(Control::Commit)
    }

    pub fn expect_rollback(&mut self) -> ResponseBuilder<T, ()> {
        self.expect_control(Control::Rollback)
    }

    fn expect_control(&mut self, kind: Control) -> ResponseBuilder<T, ()> {
        ResponseBuilder::new(&self.expectations, move |response| Expectation::Control {
            kind,
            response,
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder that queues one expectation once its response is chosen.
pub struct ResponseBuilder<T: ActorEntity, R> {
    expectations: Expectations<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ResponseBuilder<T, R> {
    fn new(
        expectations: &Expectations<T>,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.wrap)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the raw receiver behind it, for asserting on the exact
/// requests a piece of code sends.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{TransactionParticipant, TxnId, WriteScope};
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        id: String,
        body: String,
    }

    #[derive(Debug)]
    struct NoteUpdate;

    #[derive(Debug)]
    enum NoteAction {
        Append(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    #[async_trait]
    impl ActorEntity for Note {
        type Id = String;
        type Create = NoteCreate;
        type Update = NoteUpdate;
        type Action = NoteAction;
        type ActionResult = usize;
        type Context = ();
        type Error = NoteError;

        fn from_create_params(params: NoteCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id: params.id,
                body: params.body,
            })
        }

        fn id(&self) -> String {
            self.id.clone()
        }

        async fn on_update(&mut self, _update: NoteUpdate, _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: NoteAction, _ctx: &()) -> Result<usize, Self::Error> {
            match action {
                NoteAction::Append(text) => {
                    self.body.push_str(&text);
                    Ok(self.body.len())
                }
            }
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_scope() {
        let (client, mut receiver) = create_mock_client::<Note>(10);
        let txn = TxnId::new();

        let create_task = tokio::spawn(async move {
            let params = NoteCreate {
                id: "n1".to_string(),
                body: "hello".to_string(),
            };
            client.create(params, WriteScope::Deferred(txn)).await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create {
                params,
                scope,
                respond_to,
            }) => {
                assert_eq!(params.id, "n1");
                assert_eq!(scope, WriteScope::Deferred(txn));
                respond_to.send(Ok(params.id)).unwrap();
            }
            other => panic!("Expected Create request, got {:?}", other),
        }

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(id) if id == "n1"));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Note>::new();

        mock.expect_begin().return_ok(());
        mock.expect_action("n1".to_string()).return_ok(11);
        mock.expect_query().return_ok(vec![Note {
            id: "n1".to_string(),
            body: "hello world".to_string(),
        }]);
        mock.expect_rollback().return_ok(());

        let client = mock.client();
        let txn = TxnId::new();

        client.begin(txn).await.unwrap();
        let len = client
            .perform_action(
                "n1".to_string(),
                NoteAction::Append(" world".to_string()),
                WriteScope::Deferred(txn),
            )
            .await
            .unwrap();
        assert_eq!(len, 11);

        let notes = client.query(|_| true).await.unwrap();
        assert_eq!(notes.len(), 1);

        client.rollback(txn).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_response() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_commit().return_ok(());

        let client = mock.client();
        let result = client.get("n1".to_string()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
