//! Register handler (op 1)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::events::{RegisteredEvent, ServerEventType};
use crate::protocol::{CloseCode, RegisterPayload, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles Register messages
pub struct RegisterHandler;

impl RegisterHandler {
    /// Handle a Register message
    ///
    /// Binds the identifier to this connection (displacing any previous
    /// holder) and acknowledges with a `REGISTERED` event.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RegisterPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let replaced = state.registry().register(&payload.identifier, connection);

        if let Some(old) = replaced {
            tracing::info!(
                identifier = %payload.identifier,
                displaced_connection_id = %old.connection_id(),
                connection_id = %connection.connection_id(),
                "Identifier moved to a new connection"
            );
        }

        let ack = RegisteredEvent {
            identifier: payload.identifier.clone(),
            connection_id: connection.connection_id().to_string(),
        };
        let data = serde_json::to_value(&ack).unwrap_or_default();

        connection
            .send(SignalMessage::dispatch(
                ServerEventType::Registered.as_str(),
                data,
            ))
            .await
            .map_err(|e| HandlerError::Internal(format!("Failed to send REGISTERED: {e}")))?;

        tracing::info!(
            identifier = %payload.identifier,
            connection_id = %connection.connection_id(),
            "Identifier registered"
        );

        Ok(None)
    }
}
