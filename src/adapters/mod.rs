//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Reasoning provider clients (OpenAI, Anthropic, Gemini) and a mock
//! - `http` - Axum REST API

pub mod ai;
pub mod http;
