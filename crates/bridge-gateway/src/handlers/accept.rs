//! AcceptCall handler (op 3)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::events::{CallAcceptedEvent, CallFailedEvent, ServerEventType};
use crate::protocol::{AcceptCallPayload, CloseCode, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles AcceptCall messages
pub struct AcceptCallHandler;

impl AcceptCallHandler {
    /// Handle an AcceptCall message
    ///
    /// Requests a voice credential for the session and delivers identical
    /// `CALL_ACCEPTED` payloads to the original caller (if still registered)
    /// and to the accepting connection. Issuer failure fails closed: no
    /// credential to either party, `CALL_FAILED` to the accepter only.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: AcceptCallPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        // Registry access stays point reads around this await
        let grant = match state.token_issuer().issue(&payload.session_name).await {
            Ok(grant) => grant,
            Err(e) => {
                tracing::error!(
                    session_name = %payload.session_name,
                    error = %e,
                    "Voice credential issuance failed"
                );
                return Self::notify_failed(connection, &payload.session_name).await;
            }
        };

        let event = CallAcceptedEvent {
            session_name: payload.session_name.clone(),
            credential: grant.token,
        };
        let data = serde_json::to_value(&event).unwrap_or_default();

        match state.registry().lookup(&payload.original_caller) {
            Some(caller) => {
                let message =
                    SignalMessage::dispatch(ServerEventType::CallAccepted.as_str(), data.clone());
                if caller.send(message).await.is_err() {
                    tracing::debug!(
                        original_caller = %payload.original_caller,
                        "Caller connection closed before CALL_ACCEPTED delivery"
                    );
                }
            }
            None => {
                tracing::debug!(
                    original_caller = %payload.original_caller,
                    "Caller no longer registered, delivering CALL_ACCEPTED to accepter only"
                );
            }
        }

        connection
            .send(SignalMessage::dispatch(
                ServerEventType::CallAccepted.as_str(),
                data,
            ))
            .await
            .map_err(|e| HandlerError::Internal(format!("Failed to send CALL_ACCEPTED: {e}")))?;

        tracing::info!(
            original_caller = %payload.original_caller,
            session_name = %payload.session_name,
            connection_id = %connection.connection_id(),
            "Call accepted"
        );

        Ok(None)
    }

    async fn notify_failed(
        connection: &Arc<Connection>,
        session_name: &str,
    ) -> HandlerResult<Option<CloseCode>> {
        let event = CallFailedEvent {
            message: "Failed to issue voice credential".to_string(),
            session_name: session_name.to_string(),
        };
        let data = serde_json::to_value(&event).unwrap_or_default();

        connection
            .send(SignalMessage::dispatch(
                ServerEventType::CallFailed.as_str(),
                data,
            ))
            .await
            .map_err(|e| HandlerError::Internal(format!("Failed to send CALL_FAILED: {e}")))?;

        Ok(None)
    }
}
