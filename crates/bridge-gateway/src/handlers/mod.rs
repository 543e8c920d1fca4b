//! Op code handlers
//!
//! Handles incoming WebSocket messages based on their operation code.

mod accept;
mod end_call;
mod error;
mod initiate;
mod register;
mod reject;

#[cfg(test)]
mod test_util;

pub use accept::AcceptCallHandler;
pub use end_call::EndCallHandler;
pub use error::{HandlerError, HandlerResult};
pub use initiate::InitiateCallHandler;
pub use register::RegisterHandler;
pub use reject::RejectCallHandler;

use crate::connection::Connection;
use crate::protocol::{CloseCode, OpCode, SignalMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: SignalMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        // Validate that this is a client-sendable op code
        if !message.op.is_client_op() {
            tracing::warn!(
                connection_id = %connection.connection_id(),
                op = %message.op,
                "Received server-only op code from client"
            );
            return Ok(Some(CloseCode::UnknownOpcode));
        }

        match message.op {
            OpCode::Register => {
                let payload = message.as_register().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Register payload".to_string())
                })?;

                RegisterHandler::handle(state, connection, payload).await
            }
            OpCode::InitiateCall => {
                let payload = message.as_initiate_call().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid InitiateCall payload".to_string())
                })?;

                InitiateCallHandler::handle(state, connection, payload).await
            }
            OpCode::AcceptCall => {
                let payload = message.as_accept_call().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid AcceptCall payload".to_string())
                })?;

                AcceptCallHandler::handle(state, connection, payload).await
            }
            OpCode::RejectCall => {
                let payload = message.as_reject_call().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid RejectCall payload".to_string())
                })?;

                RejectCallHandler::handle(state, connection, payload).await
            }
            OpCode::EndCall => {
                let payload = message.as_end_call().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid EndCall payload".to_string())
                })?;

                EndCallHandler::handle(state, connection, payload).await
            }
            // Unreachable, Dispatch fails the is_client_op check above
            OpCode::Dispatch => {
                tracing::error!(op = %message.op, "Unhandled client op code");
                Ok(Some(CloseCode::UnknownOpcode))
            }
        }
    }
}
