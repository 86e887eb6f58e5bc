//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReasoningProvider` - Structured completions from external LLM providers

mod reasoning_provider;

pub use reasoning_provider::{
    OutputShape, ProviderFailure, ReasoningProvider, StructuredCompletion,
    StructuredCompletionRequest,
};
