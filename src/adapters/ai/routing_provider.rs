//! Routing Provider - dispatches each request to the adapter for its provider.
//!
//! # Example
//!
//! ```ignore
//! let provider = RoutingProvider::from_config(&config.providers)?;
//! let completion = provider.complete_structured(request).await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use super::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider,
};
use crate::config::ProvidersConfig;
use crate::domain::arbitration::ProviderName;
use crate::ports::{
    ProviderFailure, ReasoningProvider, StructuredCompletion, StructuredCompletionRequest,
};

/// ReasoningProvider that selects an adapter by provider name.
#[derive(Clone)]
pub struct RoutingProvider {
    openai: Arc<dyn ReasoningProvider>,
    anthropic: Arc<dyn ReasoningProvider>,
    gemini: Arc<dyn ReasoningProvider>,
}

impl RoutingProvider {
    pub fn new(
        openai: Arc<dyn ReasoningProvider>,
        anthropic: Arc<dyn ReasoningProvider>,
        gemini: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            openai,
            anthropic,
            gemini,
        }
    }

    /// Builds the HTTP adapters from provider configuration.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, reqwest::Error> {
        let connect_timeout = config.connect_timeout();

        let openai = OpenAIProvider::new(
            OpenAIConfig::new()
                .with_base_url(&config.openai_base_url)
                .with_connect_timeout(connect_timeout),
        )?;
        let anthropic = AnthropicProvider::new(
            AnthropicConfig::new()
                .with_base_url(&config.anthropic_base_url)
                .with_max_tokens(config.anthropic_max_tokens)
                .with_connect_timeout(connect_timeout),
        )?;
        let gemini = GeminiProvider::new(
            GeminiConfig::new()
                .with_base_url(&config.gemini_base_url)
                .with_connect_timeout(connect_timeout),
        )?;

        Ok(Self::new(Arc::new(openai), Arc::new(anthropic), Arc::new(gemini)))
    }

    fn adapter_for(&self, provider: ProviderName) -> &Arc<dyn ReasoningProvider> {
        match provider {
            ProviderName::OpenAI => &self.openai,
            ProviderName::Anthropic => &self.anthropic,
            ProviderName::Gemini => &self.gemini,
        }
    }
}

#[async_trait]
impl ReasoningProvider for RoutingProvider {
    async fn complete_structured(
        &self,
        request: StructuredCompletionRequest,
    ) -> Result<StructuredCompletion, ProviderFailure> {
        tracing::debug!(
            trace_id = %request.trace_id,
            provider = %request.provider,
            model = %request.model,
            "Routing structured completion"
        );
        self.adapter_for(request.provider)
            .complete_structured(request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockReasoningProvider;
    use secrecy::SecretString;

    fn request(provider: ProviderName) -> StructuredCompletionRequest {
        StructuredCompletionRequest::new(
            provider,
            "some-model",
            SecretString::new("key".to_string()),
            "Pick a move.",
        )
    }

    #[tokio::test]
    async fn routes_by_provider_name() {
        let openai = MockReasoningProvider::new().with_fixed_payload("openai");
        let anthropic = MockReasoningProvider::new().with_fixed_payload("anthropic");
        let gemini = MockReasoningProvider::new().with_fixed_payload("gemini");
        let router = RoutingProvider::new(
            Arc::new(openai.clone()),
            Arc::new(anthropic.clone()),
            Arc::new(gemini.clone()),
        );

        for provider in ProviderName::ALL {
            let completion = router.complete_structured(request(provider)).await.unwrap();
            assert_eq!(completion.payload, provider.as_str());
        }

        assert_eq!(openai.call_count(), 1);
        assert_eq!(anthropic.call_count(), 1);
        assert_eq!(gemini.call_count(), 1);
    }

    #[tokio::test]
    async fn passes_failures_through() {
        let failing =
            MockReasoningProvider::new().with_failure(ProviderFailure::with_status(404, "no model"));
        let idle = Arc::new(MockReasoningProvider::new());
        let router = RoutingProvider::new(idle.clone(), Arc::new(failing), idle);

        let err = router
            .complete_structured(request(ProviderName::Anthropic))
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn builds_from_default_config() {
        assert!(RoutingProvider::from_config(&ProvidersConfig::default()).is_ok());
    }
}
