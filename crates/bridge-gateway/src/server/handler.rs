//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::Connection;
use crate::handlers::MessageDispatcher;
use crate::protocol::{CloseCode, SignalMessage};
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let connection_id = uuid::Uuid::new_v4().to_string();

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<SignalMessage>(MESSAGE_BUFFER_SIZE);
    let connection = Connection::new(connection_id.clone(), tx);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone state for tasks
    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Spawn task to receive messages from WebSocket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(close_code) =
                        handle_text_message(&state_recv, &connection_recv, &text).await
                    {
                        tracing::debug!(
                            connection_id = %connection_recv.connection_id(),
                            close_code = ?close_code,
                            "Closing connection due to error"
                        );
                        return Some(close_code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.connection_id(),
                        "Binary messages not supported"
                    );
                    return Some(CloseCode::DecodeError);
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(connection_id = %connection_recv.connection_id(), "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_recv.connection_id(), "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        connection_id = %connection_recv.connection_id(),
                        "Client closed connection"
                    );
                    return None;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.connection_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return Some(CloseCode::UnknownError);
                }
            }
        }
        None
    });

    // Clone for send task
    let connection_id_send = connection_id.clone();

    // Spawn task to send messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = msg.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        connection_id = %connection_id_send,
                        "Failed to send message to WebSocket"
                    );
                    break;
                }
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        result = recv_task => {
            if let Ok(Some(close_code)) = result {
                tracing::debug!(
                    connection_id = %connection_id,
                    close_code = ?close_code,
                    "Receive task ended with close code"
                );
            }
        }
        _ = send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
    }

    // Clean up
    cleanup_connection(&state, &connection);
}

/// Handle a text message from the client
async fn handle_text_message(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), CloseCode> {
    // Parse the message
    let message = match SignalMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                error = %e,
                "Failed to parse message"
            );
            return Err(CloseCode::DecodeError);
        }
    };

    tracing::trace!(
        connection_id = %connection.connection_id(),
        op = %message.op,
        "Received message"
    );

    // Dispatch to handler
    match MessageDispatcher::dispatch(state, connection, message).await {
        Ok(Some(close_code)) => Err(close_code),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!(
                connection_id = %connection.connection_id(),
                error = %e,
                "Handler error"
            );
            Err(e.to_close_code().unwrap_or(CloseCode::UnknownError))
        }
    }
}

/// Clean up a connection on disconnect
fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    if let Some(identifier) = connection.identifier() {
        tracing::info!(
            connection_id = %connection.connection_id(),
            identifier = %identifier,
            "Cleaning up connection"
        );
    } else {
        tracing::info!(
            connection_id = %connection.connection_id(),
            "Cleaning up connection"
        );
    }

    state.registry().remove_connection(connection);
}
