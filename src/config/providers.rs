//! Reasoning provider configuration
//!
//! Credentials are not configuration: callers send them with every request.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Provider endpoint and timeout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Default deadline for one provider call, in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,

    /// TCP connect timeout for provider clients, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    /// Completion token cap for Anthropic requests
    #[serde(default = "default_anthropic_max_tokens")]
    pub anthropic_max_tokens: u32,

    /// Gemini API base URL
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
}

impl ProvidersConfig {
    /// Get the provider call deadline as Duration
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Get the connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider_timeout_secs == 0 || self.provider_timeout_secs > 600 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        for (name, url) in [
            ("openai", &self.openai_base_url),
            ("anthropic", &self.anthropic_base_url),
            ("gemini", &self.gemini_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::InvalidBaseUrl(name));
            }
        }
        if self.anthropic_max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            anthropic_max_tokens: default_anthropic_max_tokens(),
            gemini_base_url: default_gemini_base_url(),
        }
    }
}

fn default_provider_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    1024
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
