//! EndCall handler (op 5)

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::{CallEndedEvent, ServerEventType};
use crate::protocol::{CloseCode, EndCallPayload, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles EndCall messages
pub struct EndCallHandler;

impl EndCallHandler {
    /// Handle an EndCall message
    ///
    /// Notifies the other party that the call was ended. An absent target
    /// is a silent drop.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: EndCallPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Some(target) = state.registry().lookup(&payload.to) else {
            tracing::debug!(
                from = %payload.from,
                to = %payload.to,
                "End-call target not registered, dropping"
            );
            return Ok(None);
        };

        let event = CallEndedEvent {
            message: "Call ended by other party".to_string(),
            from: payload.from.clone(),
        };
        let data = serde_json::to_value(&event).unwrap_or_default();

        if target
            .send(SignalMessage::dispatch(
                ServerEventType::CallEnded.as_str(),
                data,
            ))
            .await
            .is_err()
        {
            tracing::debug!(
                to = %payload.to,
                "Target connection closed before CALL_ENDED delivery"
            );
        }

        tracing::info!(
            from = %payload.from,
            to = %payload.to,
            connection_id = %connection.connection_id(),
            "Call ended"
        );

        Ok(None)
    }
}
