//! Relay message format
//!
//! Defines the structure for all WebSocket messages.

use super::{
    AcceptCallPayload, CloseCode, EndCallPayload, InitiateCallPayload, OpCode, RegisterPayload,
    RejectCallPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relay message format
///
/// All messages sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalMessage {
    /// Operation code
    pub op: OpCode,

    /// Event type (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Event data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl SignalMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            d: Some(data),
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse as a Register payload (op=1)
    pub fn as_register(&self) -> Option<RegisterPayload> {
        if self.op != OpCode::Register {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as an InitiateCall payload (op=2)
    pub fn as_initiate_call(&self) -> Option<InitiateCallPayload> {
        if self.op != OpCode::InitiateCall {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as an AcceptCall payload (op=3)
    pub fn as_accept_call(&self) -> Option<AcceptCallPayload> {
        if self.op != OpCode::AcceptCall {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a RejectCall payload (op=4)
    pub fn as_reject_call(&self) -> Option<RejectCallPayload> {
        if self.op != OpCode::RejectCall {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as an EndCall payload (op=5)
    pub fn as_end_call(&self) -> Option<EndCallPayload> {
        if self.op != OpCode::EndCall {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Check if this is a valid client message
    #[must_use]
    pub fn is_valid_client_message(&self) -> bool {
        self.op.is_client_op()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create an error close frame
    #[must_use]
    pub fn close_frame(code: CloseCode) -> (u16, String) {
        (code.as_u16(), code.description().to_string())
    }
}

impl std::fmt::Display for SignalMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "SignalMessage(op={}, t={t})", self.op)
        } else {
            write!(f, "SignalMessage(op={})", self.op)
        }
    }
}
