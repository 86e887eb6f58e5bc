//! Move Arbiter - LLM-backed move selection for two-player board games
//!
//! This crate asks an external reasoning provider for the next move in a
//! tic-tac-toe or reversi position and only returns answers that are members
//! of the caller's legal-move set.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
