//! OpenAI Provider - ReasoningProvider over the chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new().with_base_url("https://api.openai.com/v1");
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Structured output uses `response_format: json_object`; the field contract
//! itself is stated in the instructions and enforced by the domain.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_client;
use crate::ports::{
    ProviderFailure, ReasoningProvider, StructuredCompletion, StructuredCompletionRequest,
};

/// Default base URL for the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAIConfig {
    pub fn new() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Result<Self, reqwest::Error> {
        let client = http_client::build_client(config.connect_timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(request: &StructuredCompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: request.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: Some(request.instructions.clone()),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    /// Extracts the first choice's message content.
    fn extract_payload(body: &str) -> Result<StructuredCompletion, serde_json::Error> {
        let response: OpenAIResponse = serde_json::from_str(body)?;
        let payload = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(StructuredCompletion::new(payload, response.model))
    }
}

#[async_trait]
impl ReasoningProvider for OpenAIProvider {
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure> {
        let body = http_client::send(
            self.client
                .post(self.completions_url())
                .bearer_auth(request.credential().expose_secret())
                .json(&Self::to_openai_request(&request)),
        )
        .await?;

        Ok(Self::extract_payload(&body).unwrap_or_else(|e| {
            tracing::warn!(trace_id = %request.trace_id, error = %e, "Unreadable OpenAI response envelope");
            StructuredCompletion::new("", request.model)
        }))
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}
