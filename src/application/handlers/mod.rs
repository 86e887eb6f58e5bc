//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod decide_move;

pub use decide_move::{DecideMoveCommand, DecideMoveHandler};
