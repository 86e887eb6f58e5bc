//! Anthropic Provider - ReasoningProvider over the Claude messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new().with_max_tokens(1024);
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! # Structured output
//!
//! The messages API has no JSON mode. The output shape is offered as a
//! single tool and `tool_choice` forces the model to call it, so the tool
//! input is the structured payload.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::http_client;
use crate::ports::{
    ProviderFailure, ReasoningProvider, StructuredCompletion, StructuredCompletionRequest,
};

/// Default base URL for the Anthropic API.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Completion token cap sent with every request.
    pub max_tokens: u32,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicConfig {
    pub fn new() -> Self {
        Self {
            base_url: ANTHROPIC_BASE_URL.to_string(),
            max_tokens: 1024,
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Result<Self, reqwest::Error> {
        let client = http_client::build_client(config.connect_timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, request: &StructuredCompletionRequest) -> AnthropicRequest {
        let shape = &request.output_shape;
        AnthropicRequest {
            model: request.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.instructions.clone(),
            }],
            tools: vec![AnthropicTool {
                name: shape.name,
                description: shape.description,
                input_schema: shape.json_schema(),
            }],
            tool_choice: ToolChoice {
                kind: "tool",
                name: shape.name,
            },
        }
    }

    /// Uses the forced tool call's input; falls back to any text blocks.
    fn extract_payload(body: &str) -> Result<StructuredCompletion, serde_json::Error> {
        let response: AnthropicResponse = serde_json::from_str(body)?;

        let tool_input = response.content.iter().find_map(|block| match block {
            ContentBlock::ToolUse { input } => Some(input.to_string()),
            _ => None,
        });

        let payload = tool_input.unwrap_or_else(|| {
            response
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<String>()
        });

        Ok(StructuredCompletion::new(payload, response.model))
    }
}

#[async_trait]
impl ReasoningProvider for AnthropicProvider {
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure> {
        let body = http_client::send(
            self.client
                .post(self.messages_url())
                .header("x-api-key", request.credential().expose_secret())
                .header("anthropic-version", ANTHROPIC_API_VERSION)
                .json(&self.to_anthropic_request(&request)),
        )
        .await?;

        Ok(Self::extract_payload(&body).unwrap_or_else(|e| {
            tracing::warn!(trace_id = %request.trace_id, error = %e, "Unreadable Anthropic response envelope");
            StructuredCompletion::new("", request.model)
        }))
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    tools: Vec<AnthropicTool>,
    tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        input: Value,
    },
    #[serde(other)]
    Other,
}
