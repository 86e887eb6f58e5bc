//! Provider dispatch: one bounded outbound call per decision.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::arbitration::{routing_identifier, ArbitrationError, ValidatedMoveRequest};
use crate::domain::encoding::EncodedPosition;
use crate::ports::{ReasoningProvider, StructuredCompletionRequest};

/// Sends encoded positions to the reasoning provider.
///
/// Resolves the routing identifier, attaches the caller's credential and
/// bounds the call with a deadline. No retries.
#[derive(Clone)]
pub struct ProviderDispatcher {
    provider: Arc<dyn ReasoningProvider>,
    default_timeout: Duration,
}

impl ProviderDispatcher {
    pub fn new(provider: Arc<dyn ReasoningProvider>, default_timeout: Duration) -> Self {
        Self {
            provider,
            default_timeout,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Returns the raw provider payload.
    ///
    /// Fails with `TRANSPORT` when the deadline expires; other provider
    /// failures are classified from their status and text.
    pub async fn dispatch(
        &self,
        request: &ValidatedMoveRequest,
        encoded: &EncodedPosition,
        timeout: Option<Duration>,
        trace_id: &str,
    ) -> Result<String, ArbitrationError> {
        let provider = request.provider();
        let deadline = timeout.unwrap_or(self.default_timeout);

        let completion_request = StructuredCompletionRequest::new(
            provider.name,
            routing_identifier(provider.name, &provider.model),
            provider.credential.clone(),
            encoded.instructions(),
        )
        .with_trace_id(trace_id);

        match tokio::time::timeout(deadline, self.provider.complete_structured(completion_request))
            .await
        {
            Ok(Ok(completion)) => Ok(completion.payload),
            Ok(Err(failure)) => Err(failure.into()),
            Err(_) => Err(ArbitrationError::transport(format!(
                "provider call timed out after {}ms",
                deadline.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockReasoningProvider;
    use crate::domain::arbitration::{ErrorKind, MoveRequest, ProviderConfig, ProviderName};
    use crate::domain::encoding::encoder_for;
    use crate::ports::ProviderFailure;
    use secrecy::SecretString;

    fn validated(provider: &str, model: &str) -> ValidatedMoveRequest {
        MoveRequest {
            provider: ProviderConfig::new(provider, model, SecretString::new("key".to_string())),
            game_type: "tictactoe".to_string(),
            position: vec![None; 9],
            legal_moves: (0..9).collect(),
            role_to_move: "X".to_string(),
        }
        .validate()
        .unwrap()
    }

    async fn dispatch(
        mock: &MockReasoningProvider,
        request: &ValidatedMoveRequest,
        timeout: Option<Duration>,
    ) -> Result<String, ArbitrationError> {
        let dispatcher = ProviderDispatcher::new(Arc::new(mock.clone()), Duration::from_secs(5));
        let encoded = encoder_for(request.game_type()).encode(request);
        dispatcher.dispatch(request, &encoded, timeout, "trace-1").await
    }

    #[tokio::test]
    async fn sends_routing_identifier_and_instructions() {
        let mock = MockReasoningProvider::new().with_fixed_payload("payload");
        let request = validated("gemini", "gemini-2.5-flash");

        let payload = dispatch(&mock, &request, None).await.unwrap();

        assert_eq!(payload, "payload");
        let call = &mock.calls()[0];
        assert_eq!(call.provider, ProviderName::Gemini);
        assert_eq!(call.model, "gemini/gemini-2.5-flash");
        assert_eq!(call.trace_id, "trace-1");
        assert!(call.instructions.contains("Tic-Tac-Toe"));
    }

    #[tokio::test]
    async fn classifies_provider_failures() {
        let mock =
            MockReasoningProvider::new().with_failure(ProviderFailure::with_status(429, "slow down"));
        let err = dispatch(&mock, &validated("openai", "gpt-4o"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
    }

    #[tokio::test]
    async fn expired_deadline_is_transport() {
        let mock = MockReasoningProvider::new()
            .with_fixed_payload("late")
            .with_delay(Duration::from_millis(200));

        let err = dispatch(
            &mock,
            &validated("openai", "gpt-4o"),
            Some(Duration::from_millis(20)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.message().contains("20ms"));
    }

    #[tokio::test]
    async fn makes_exactly_one_attempt() {
        let mock = MockReasoningProvider::new()
            .with_failure(ProviderFailure::new("connection reset"))
            .with_fixed_payload("would succeed on retry");

        let err = dispatch(&mock, &validated("anthropic", "claude-3-5-sonnet"), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(mock.call_count(), 1);
    }
}
