//! DecideMove - Command handler that obtains one validated move.
//!
//! Pipeline: validate the request, encode the position, dispatch once to the
//! reasoning provider, then validate the answer against the legal-move set.
//! Any failure short-circuits; nothing is retried or repaired.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::dispatcher::ProviderDispatcher;
use crate::domain::arbitration::{parse_decision, ArbitrationError, MoveDecision, MoveRequest};
use crate::domain::encoding::encoder_for;
use crate::ports::ReasoningProvider;

/// Command to decide the next move.
#[derive(Debug, Clone)]
pub struct DecideMoveCommand {
    pub request: MoveRequest,
    /// Per-request provider deadline; the handler default applies when unset.
    pub timeout: Option<Duration>,
}

impl DecideMoveCommand {
    pub fn new(request: MoveRequest) -> Self {
        Self {
            request,
            timeout: None,
        }
    }

    /// Overrides the provider deadline for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Handler for move decisions.
pub struct DecideMoveHandler {
    dispatcher: ProviderDispatcher,
    max_timeout: Option<Duration>,
}

impl DecideMoveHandler {
    pub fn new(provider: Arc<dyn ReasoningProvider>, default_timeout: Duration) -> Self {
        Self {
            dispatcher: ProviderDispatcher::new(provider, default_timeout),
            max_timeout: None,
        }
    }

    /// Per-request timeouts must stay strictly below `max`.
    pub fn with_max_timeout(mut self, max: Duration) -> Self {
        self.max_timeout = Some(max);
        self
    }

    pub async fn handle(&self, cmd: DecideMoveCommand) -> Result<MoveDecision, ArbitrationError> {
        let trace_id = Uuid::new_v4().to_string();
        let provider_name = cmd.request.provider.provider_name.clone();
        let model = cmd.request.provider.model.clone();

        let result = self.decide(cmd, &trace_id).await;

        match &result {
            Ok(decision) => tracing::info!(
                trace_id = %trace_id,
                provider = %provider_name,
                model = %model,
                chosen_move = decision.chosen_move(),
                "Move decided"
            ),
            Err(err) => tracing::warn!(
                trace_id = %trace_id,
                provider = %provider_name,
                model = %model,
                error_kind = %err.kind(),
                error = %err.message(),
                "Move decision failed"
            ),
        }

        result
    }

    async fn decide(
        &self,
        cmd: DecideMoveCommand,
        trace_id: &str,
    ) -> Result<MoveDecision, ArbitrationError> {
        if let Some(timeout) = cmd.timeout {
            self.check_timeout(timeout)?;
        }

        // 1. Validate
        let request = cmd.request.validate()?;

        // 2. Encode
        let encoded = encoder_for(request.game_type()).encode(&request);
        tracing::debug!(
            trace_id = %trace_id,
            game = %request.game_type(),
            role = %request.role(),
            legal_moves = request.legal_moves().len(),
            "Dispatching move request"
        );

        // 3. Dispatch
        let payload = self
            .dispatcher
            .dispatch(&request, &encoded, cmd.timeout, trace_id)
            .await?;

        // 4. Validate the answer
        parse_decision(&payload, encoded.legal_moves())
    }

    fn check_timeout(&self, timeout: Duration) -> Result<(), ArbitrationError> {
        if timeout.is_zero() {
            return Err(ArbitrationError::invalid_request(
                "timeout must be greater than zero",
            ));
        }
        match self.max_timeout {
            Some(max) if timeout >= max => Err(ArbitrationError::invalid_request(format!(
                "timeout must be below {}ms",
                max.as_millis()
            ))),
            _ => Ok(()),
        }
    }
}
