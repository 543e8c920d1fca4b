//! InitiateCall handler (op 2)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::events::{IncomingCallEvent, ServerEventType, TargetUnavailableEvent};
use crate::protocol::{CloseCode, InitiateCallPayload, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles InitiateCall messages
pub struct InitiateCallHandler;

impl InitiateCallHandler {
    /// Handle an InitiateCall message
    ///
    /// Forwards the invitation to the callee's connection, or reports
    /// `TARGET_UNAVAILABLE` back to the initiator when the callee is not
    /// registered.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: InitiateCallPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Some(target) = state.registry().lookup(&payload.to) else {
            tracing::info!(
                from = %payload.from,
                to = %payload.to,
                "Call target not registered"
            );
            Self::notify_unavailable(connection, &payload.to).await?;
            return Ok(None);
        };

        let event = IncomingCallEvent {
            from: payload.from.clone(),
            session_name: payload.session_name.clone(),
        };
        let data = serde_json::to_value(&event).unwrap_or_default();
        let message = SignalMessage::dispatch(ServerEventType::IncomingCall.as_str(), data);

        if target.send(message).await.is_err() {
            // Target socket is tearing down but has not been cleaned up yet
            tracing::debug!(
                from = %payload.from,
                to = %payload.to,
                "Call target connection closed mid-delivery"
            );
            Self::notify_unavailable(connection, &payload.to).await?;
            return Ok(None);
        }

        tracing::info!(
            from = %payload.from,
            to = %payload.to,
            session_name = %payload.session_name,
            "Call invitation forwarded"
        );

        Ok(None)
    }

    async fn notify_unavailable(connection: &Arc<Connection>, to: &str) -> HandlerResult<()> {
        let event = TargetUnavailableEvent {
            message: format!("{to} is not available"),
        };
        let data = serde_json::to_value(&event).unwrap_or_default();

        connection
            .send(SignalMessage::dispatch(
                ServerEventType::TargetUnavailable.as_str(),
                data,
            ))
            .await
            .map_err(|e| {
                HandlerError::Internal(format!("Failed to send TARGET_UNAVAILABLE: {e}"))
            })?;

        Ok(())
    }
}
