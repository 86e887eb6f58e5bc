//! Move arbitration: request validation, response validation, provider
//! naming and failure classification.
//!
//! The pipeline that ties these together lives in
//! `application::handlers::decide_move`.

mod classifier;
mod decision;
mod errors;
mod naming;
mod request;
mod validator;

pub use classifier::classify_failure;
pub use decision::{parse_decision, MoveDecision, MOVE_FIELD, RATIONALE_FIELD};
pub use errors::{ArbitrationError, ErrorKind, StatusClass};
pub use naming::{native_model, routing_identifier};
pub use request::{
    LegalMoves, MoveRequest, ProviderConfig, ProviderName, ResolvedProvider, UnknownProvider,
    ValidatedMoveRequest,
};
