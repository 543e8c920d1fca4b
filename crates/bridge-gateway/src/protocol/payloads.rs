//! Client payload definitions
//!
//! Defines the payload structures for client-to-server messages.

use serde::{Deserialize, Serialize};

/// Payload for op 1 (Register)
///
/// Sent by the client to claim an identifier for this connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    /// Identifier to register, typically a phone number
    pub identifier: String,
}

/// Payload for op 2 (InitiateCall)
///
/// Sent by the caller to ring another identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateCallPayload {
    /// Caller's identifier
    pub from: String,

    /// Callee's identifier
    pub to: String,

    /// Voice session both parties will join
    pub session_name: String,
}

/// Payload for op 3 (AcceptCall)
///
/// Sent by the callee to accept a pending call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptCallPayload {
    /// Identifier of the party that initiated the call
    pub original_caller: String,

    /// Voice session named in the invitation
    pub session_name: String,
}

/// Payload for op 4 (RejectCall)
///
/// Sent by the callee to decline a pending call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectCallPayload {
    /// Identifier of the party that initiated the call
    pub original_caller: String,

    /// Voice session named in the invitation
    pub session_name: String,
}

/// Payload for op 5 (EndCall)
///
/// Sent by either party to hang up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndCallPayload {
    /// Identifier of the party hanging up
    pub from: String,

    /// Identifier of the other party
    pub to: String,
}
