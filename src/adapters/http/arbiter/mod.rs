//! HTTP adapter for move arbitration endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, MoveRequestDto, MoveResponseDto, PlayerConfigDto};
pub use handlers::{ArbiterApiError, ArbiterAppState};
pub use routes::arbiter_router;
