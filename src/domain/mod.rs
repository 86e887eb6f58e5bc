//! Domain layer: game positions, position encoding and move arbitration.
//!
//! # Module Organization
//!
//! - `game` - Board positions, markers and game types
//! - `encoding` - Game-specific instruction builders for reasoning providers
//! - `arbitration` - Request validation, response validation and failure classification

pub mod arbitration;
pub mod encoding;
pub mod game;
