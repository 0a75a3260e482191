//! # Mock Store & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. It makes store failures easy
//! to inject, which is how the sweepers' per-item isolation is tested.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (scripted answers) | Real store |
//! | **Error Injection** | `return_err` | Hard |
//! | **Use Case** | Logic *around* the client (sweepers, sessions) | The entity itself, full system |
//!
//! ```rust,ignore
//! let mut orders = MockClient::<Order>::new();
//! orders.expect_list().return_ok(vec![pending_order]);
//! orders.expect_update(OrderId(1)).return_err(FrameworkError::ActorDropped);
//!
//! let sweeper = OrderSweeper::new(OrderClient::new(orders.client()), timeout, clock);
//! let report = sweeper.sweep_expired().await?;
//! assert_eq!(report.failed, 1);
//! orders.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation gets its responder dropped (the caller sees
//! [`FrameworkError::ActorDropped`]) and is recorded, so [`MockClient::verify`] fails
//! the test.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Flush {
        response: Result<(), FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
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
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let mismatches_clone = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Flush { respond_to },
                        Some(Expectation::Flush { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        mismatches_clone
                            .lock()
                            .unwrap()
                            .push(format!("unexpected request: {request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    /// Expects a `save()` (flush) call.
    pub fn expect_flush(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, |response| Expectation::Flush { response })
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Mock received unexpected requests: {mismatches:?}");
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder returned by the `expect_*` methods. Finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

/// Creates a client and the raw receiver behind it, for tests that need to inspect
/// request payloads (e.g. the `expected_version` on an update).
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Seat {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct SeatCreate {
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Seat error")]
    struct SeatError;

    #[async_trait]
    impl ActorEntity for Seat {
        type Id = u32;
        type Create = SeatCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Query = ();
        type Context = ();
        type Error = SeatError;

        fn from_create_params(id: u32, params: SeatCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
            })
        }

        fn matches(&self, _query: &()) -> bool {
            true
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client_exposes_payload() {
        let (client, mut receiver) = create_mock_client::<Seat>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(SeatCreate {
                    label: "A1".to_string(),
                })
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create { params, respond_to }) => {
                assert_eq!(params.label, "A1");
                respond_to.send(Ok(1)).unwrap();
            }
            other => panic!("expected Create, got {other:?}"),
        }

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Seat>::new();
        mock.expect_list().return_ok(vec![Seat {
            id: 1,
            label: "A1".to_string(),
        }]);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));
        mock.expect_flush().return_ok(());

        let client = mock.client();
        let seats = client.list(None).await.unwrap();
        assert_eq!(seats.len(), 1);
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));
        client.flush().await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "unexpected requests")]
    async fn test_mock_client_records_mismatch() {
        let mut mock = MockClient::<Seat>::new();
        mock.expect_get(7).return_ok(None);

        let client = mock.client();
        // wrong id: the responder is dropped and the mismatch is recorded
        assert!(client.get(8).await.is_err());
        mock.verify();
    }
}
