//! Reasoning Provider Adapters.
//!
//! Implementations of the ReasoningProvider port for the supported LLM providers.
//!
//! ## Available Adapters
//!
//! - `MockReasoningProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions in JSON mode
//! - `AnthropicProvider` - Anthropic messages with a forced tool call
//! - `GeminiProvider` - Gemini generateContent with a response schema
//! - `RoutingProvider` - Selects one of the above by provider name

mod anthropic_provider;
mod gemini_provider;
mod http_client;
mod mock_provider;
mod openai_provider;
mod routing_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, ANTHROPIC_BASE_URL};
pub use gemini_provider::{GeminiConfig, GeminiProvider, GEMINI_BASE_URL};
pub use mock_provider::{MockReasoningProvider, MockResponse, RecordedCall};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, OPENAI_BASE_URL};
pub use routing_provider::RoutingProvider;
