//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::ProviderDispatcher;
pub use handlers::{DecideMoveCommand, DecideMoveHandler};
