//! Game vocabulary: markers, cells, board positions and game types.
//!
//! The arbiter does not implement any game rules. Legality is decided by an
//! external rules engine and arrives with each request as a set of indices.

mod board;
mod game_type;
mod marker;

pub use board::{BoardPosition, BoardSizeMismatch};
pub use game_type::{GameType, UnknownGameType};
pub use marker::{Cell, Marker, UnknownMarker};
