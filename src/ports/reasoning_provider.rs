//! Reasoning Provider Port - Interface for structured LLM completions.
//!
//! This port abstracts the single outbound call the arbiter makes: send one
//! instruction payload to a named provider/model and get back a raw payload
//! that is supposed to match a fixed output shape.
//!
//! # Design
//!
//! - One non-streaming call per request; no retries at this layer
//! - Credentials travel with each request and are never stored by adapters
//! - Failures carry an optional upstream status plus descriptive text, which
//!   the domain classifies without provider-specific error types
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl ReasoningProvider for FixedProvider {
//!     async fn complete_structured(
//!         &self,
//!         request: StructuredCompletionRequest,
//!     ) -> Result<StructuredCompletion, ProviderFailure> {
//!         Ok(StructuredCompletion::new(r#"{"move": 4, "rationale": "center"}"#, request.model))
//!     }
//! }
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{json, Value};

use crate::domain::arbitration::{
    classify_failure, ArbitrationError, ProviderName, MOVE_FIELD, RATIONALE_FIELD,
};

/// Port for structured completions from external reasoning providers.
///
/// Implementations translate between a provider's HTTP API and these types.
/// They must not retry and must not log the credential.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Performs one structured completion.
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure>;
}

/// Request for one structured completion.
#[derive(Debug, Clone)]
pub struct StructuredCompletionRequest {
    /// Provider to dispatch to.
    pub provider: ProviderName,
    /// Routing identifier (may carry a provider prefix such as `gemini/`).
    pub model: String,
    /// Instruction payload, sent as a single user turn.
    pub instructions: String,
    /// Shape the provider is asked to produce.
    pub output_shape: OutputShape,
    /// Per-decision trace id for log correlation.
    pub trace_id: String,
    credential: SecretString,
}

impl StructuredCompletionRequest {
    /// Creates a request asking for a [`OutputShape::move_decision`] answer.
    pub fn new(
        provider: ProviderName,
        model: impl Into<String>,
        credential: SecretString,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            instructions: instructions.into(),
            output_shape: OutputShape::move_decision(),
            trace_id: String::new(),
            credential,
        }
    }

    /// Sets the trace id.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Caller-supplied credential for this request only.
    pub fn credential(&self) -> &SecretString {
        &self.credential
    }
}

/// Raw payload returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredCompletion {
    /// Untrusted payload text; validated by the domain.
    pub payload: String,
    /// Model that produced the payload, as reported by the provider.
    pub model: String,
}

impl StructuredCompletion {
    pub fn new(payload: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            model: model.into(),
        }
    }
}

/// A named structured output contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputShape {
    /// Name used where providers require one (tool names, schema titles).
    pub name: &'static str,
    /// Short description of what the object represents.
    pub description: &'static str,
}

impl OutputShape {
    /// The `{move: integer, rationale: string}` move decision.
    pub fn move_decision() -> Self {
        Self {
            name: "submit_move",
            description: "Submit the chosen move index and a concise rationale.",
        }
    }

    /// JSON schema for the shape.
    pub fn json_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                MOVE_FIELD: {
                    "type": "integer",
                    "description": "Index of the chosen move; must be one of the legal moves."
                },
                RATIONALE_FIELD: {
                    "type": "string",
                    "description": "Concise explanation of the choice."
                }
            },
            "required": [MOVE_FIELD, RATIONALE_FIELD]
        })
    }
}

/// Failure reported by a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderFailure {
    /// Upstream HTTP status, when one was received.
    pub status: Option<u16>,
    /// Descriptive text (upstream body or transport error).
    pub message: String,
}

impl ProviderFailure {
    /// Creates a failure without an upstream status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a failure carrying an upstream status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<ProviderFailure> for ArbitrationError {
    fn from(failure: ProviderFailure) -> Self {
        classify_failure(failure.status, &failure.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arbitration::ErrorKind;

    fn request() -> StructuredCompletionRequest {
        StructuredCompletionRequest::new(
            ProviderName::OpenAI,
            "gpt-4o",
            SecretString::new("sk-live-123".to_string()),
            "pick a move",
        )
        .with_trace_id("trace-1")
    }

    #[test]
    fn request_builder_defaults_to_move_shape() {
        let request = request();
        assert_eq!(request.output_shape, OutputShape::move_decision());
        assert_eq!(request.trace_id, "trace-1");
        assert_eq!(request.model, "gpt-4o");
    }

    #[test]
    fn request_debug_hides_credential() {
        let debug = format!("{:?}", request());
        assert!(!debug.contains("sk-live-123"));
    }

    #[test]
    fn schema_requires_both_fields() {
        let schema = OutputShape::move_decision().json_schema();
        assert_eq!(schema["properties"]["move"]["type"], "integer");
        assert_eq!(schema["properties"]["rationale"]["type"], "string");
        assert_eq!(schema["required"], json!(["move", "rationale"]));
    }

    #[test]
    fn failure_converts_through_classifier() {
        let err: ArbitrationError = ProviderFailure::with_status(401, "bad key").into();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.message(), "bad key");

        let err: ArbitrationError = ProviderFailure::new("connection refused").into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn failure_displays_message() {
        assert_eq!(
            ProviderFailure::with_status(429, "slow down").to_string(),
            "slow down"
        );
    }
}
