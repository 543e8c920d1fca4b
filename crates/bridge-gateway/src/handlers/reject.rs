//! RejectCall handler (op 4)

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::{CallRejectedEvent, ServerEventType};
use crate::protocol::{CloseCode, RejectCallPayload, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles RejectCall messages
pub struct RejectCallHandler;

impl RejectCallHandler {
    /// Handle a RejectCall message
    ///
    /// Notifies the original caller that the callee declined. An absent
    /// caller is a silent drop.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RejectCallPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Some(caller) = state.registry().lookup(&payload.original_caller) else {
            tracing::debug!(
                original_caller = %payload.original_caller,
                "Reject target not registered, dropping"
            );
            return Ok(None);
        };

        let event = CallRejectedEvent {
            message: "Call rejected by user".to_string(),
            session_name: payload.session_name.clone(),
        };
        let data = serde_json::to_value(&event).unwrap_or_default();

        if caller
            .send(SignalMessage::dispatch(
                ServerEventType::CallRejected.as_str(),
                data,
            ))
            .await
            .is_err()
        {
            tracing::debug!(
                original_caller = %payload.original_caller,
                "Caller connection closed before CALL_REJECTED delivery"
            );
        }

        tracing::info!(
            original_caller = %payload.original_caller,
            session_name = %payload.session_name,
            connection_id = %connection.connection_id(),
            "Call rejected"
        );

        Ok(None)
    }
}
