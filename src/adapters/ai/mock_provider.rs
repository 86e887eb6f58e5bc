//! Mock Reasoning Provider for testing.
//!
//! Provides a configurable implementation of the ReasoningProvider port,
//! allowing tests to run without calling real provider APIs.
//!
//! # Features
//!
//! - Queued payloads and failures, or one fixed payload for every call
//! - Simulated delays for timeout testing
//! - Credential checks for auth testing
//! - Call tracking for verification (credentials are never recorded)
//!
//! # Example
//!
//! ```ignore
//! let provider = MockReasoningProvider::new()
//!     .with_payload(r#"{"move": 2, "rationale": "Completes the top row."}"#)
//!     .with_delay(Duration::from_millis(100));
//!
//! let completion = provider.complete_structured(request).await?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::arbitration::ProviderName;
use crate::ports::{
    ProviderFailure, ReasoningProvider, StructuredCompletion, StructuredCompletionRequest,
};

/// Mock reasoning provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockReasoningProvider {
    /// Scripted answers, consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Answer returned once the queue is empty.
    fallback: Option<MockResponse>,
    /// Only this credential is accepted, when set.
    required_credential: Option<SecretString>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A scripted mock answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Return this raw payload.
    Payload(String),
    /// Fail with this provider failure.
    Failure(ProviderFailure),
}

/// What the mock saw for one call. The credential is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub provider: ProviderName,
    pub model: String,
    pub instructions: String,
    pub trace_id: String,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockReasoningProvider {
    /// Creates a mock with nothing scripted.
    ///
    /// Unscripted calls fail with an unclassified provider failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw payload.
    pub fn with_payload(self, payload: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Payload(payload.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: ProviderFailure) -> Self {
        lock(&self.responses).push_back(MockResponse::Failure(failure));
        self
    }

    /// Returns this payload for every call once the queue is exhausted.
    pub fn with_fixed_payload(mut self, payload: impl Into<String>) -> Self {
        self.fallback = Some(MockResponse::Payload(payload.into()));
        self
    }

    /// Rejects any other credential with a 401.
    pub fn with_required_credential(mut self, credential: SecretString) -> Self {
        self.required_credential = Some(credential);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| {
                MockResponse::Failure(ProviderFailure::new("mock provider has no scripted response"))
            })
    }

    fn credential_accepted(&self, request: &StructuredCompletionRequest) -> bool {
        self.required_credential.as_ref().map_or(true, |required| {
            required.expose_secret() == request.credential().expose_secret()
        })
    }
}

#[async_trait]
impl ReasoningProvider for MockReasoningProvider {
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure> {
        lock(&self.calls).push(RecordedCall {
            provider: request.provider,
            model: request.model.clone(),
            instructions: request.instructions.clone(),
            trace_id: request.trace_id.clone(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if !self.credential_accepted(&request) {
            return Err(ProviderFailure::with_status(
                401,
                "AuthenticationError: Incorrect API key provided",
            ));
        }

        match self.next_response() {
            MockResponse::Payload(payload) => Ok(StructuredCompletion::new(payload, request.model)),
            MockResponse::Failure(failure) => Err(failure),
        }
    }
}
