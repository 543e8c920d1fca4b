//! Event payload definitions
//!
//! Defines the data structures for each relay event type.

use serde::{Deserialize, Serialize};

// === Presence Events ===

/// REGISTERED event payload
///
/// Sent after a successful Register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredEvent {
    /// Identifier now bound to this connection
    pub identifier: String,

    /// Server-assigned connection ID
    pub connection_id: String,
}

// === Call Lifecycle Events ===

/// INCOMING_CALL event payload
///
/// Sent to the callee when a peer initiates a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingCallEvent {
    /// Identifier of the calling party
    pub from: String,

    /// Voice session to join on accept
    pub session_name: String,
}

/// TARGET_UNAVAILABLE event payload
///
/// Sent to the initiator when the callee is not registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetUnavailableEvent {
    pub message: String,
}

/// CALL_ACCEPTED event payload
///
/// Sent to both parties once the callee accepts. Carries the voice credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallAcceptedEvent {
    pub session_name: String,

    /// Time-limited voice-session credential
    pub credential: String,
}

/// CALL_REJECTED event payload
///
/// Sent to the original caller when the callee declines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRejectedEvent {
    pub message: String,
    pub session_name: String,
}

/// CALL_ENDED event payload
///
/// Sent to the other party when one side hangs up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEndedEvent {
    pub message: String,

    /// Identifier of the party that hung up
    pub from: String,
}

/// CALL_FAILED event payload
///
/// Sent to the accepting connection when credential issuance fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFailedEvent {
    pub message: String,
    pub session_name: String,
}
