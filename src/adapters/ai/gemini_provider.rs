//! Gemini Provider - ReasoningProvider over the Generative Language API.
//!
//! Models arrive as routing identifiers (`gemini/gemini-2.5-flash`); the
//! routing prefix is stripped before it reaches the URL path. Structured
//! output uses `responseMimeType: application/json` with a response schema.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::http_client;
use crate::domain::arbitration::{native_model, ProviderName};
use crate::ports::{
    ProviderFailure, ReasoningProvider, StructuredCompletion, StructuredCompletionRequest,
};

/// Default base URL for the Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
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

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = http_client::build_client(config.connect_timeout)?;
        Ok(Self { config, client })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            native_model(ProviderName::Gemini, model)
        )
    }

    fn to_gemini_request(request: &StructuredCompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.instructions.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.output_shape.json_schema(),
            },
        }
    }

    /// Concatenates the text parts of the first candidate.
    fn extract_payload(body: &str, model: &str) -> Result<StructuredCompletion, serde_json::Error> {
        let response: GeminiResponse = serde_json::from_str(body)?;
        let payload = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let model = response.model_version.unwrap_or_else(|| model.to_string());
        Ok(StructuredCompletion::new(payload, model))
    }
}

#[async_trait]
impl ReasoningProvider for GeminiProvider {
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure> {
        let body = http_client::send(
            self.client
                .post(self.generate_url(&request.model))
                .header("x-goog-api-key", request.credential().expose_secret())
                .json(&Self::to_gemini_request(&request)),
        )
        .await?;

        Ok(Self::extract_payload(&body, &request.model).unwrap_or_else(|e| {
            tracing::warn!(trace_id = %request.trace_id, error = %e, "Unreadable Gemini response envelope");
            StructuredCompletion::new("", request.model.clone())
        }))
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}
