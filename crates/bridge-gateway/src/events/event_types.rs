//! Relay event types
//!
//! Defines all event type names for dispatch messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relay event types
///
/// These are the event names sent in the `t` field of dispatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerEventType {
    // Presence events
    /// Sent after a successful Register
    Registered,

    // Call lifecycle events
    /// A peer is ringing this connection
    IncomingCall,
    /// The callee is not registered
    TargetUnavailable,
    /// The callee accepted; carries the voice credential
    CallAccepted,
    /// The callee declined
    CallRejected,
    /// The other party hung up
    CallEnded,
    /// Credential issuance failed during accept
    CallFailed,
}

impl ServerEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::IncomingCall => "INCOMING_CALL",
            Self::TargetUnavailable => "TARGET_UNAVAILABLE",
            Self::CallAccepted => "CALL_ACCEPTED",
            Self::CallRejected => "CALL_REJECTED",
            Self::CallEnded => "CALL_ENDED",
            Self::CallFailed => "CALL_FAILED",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "REGISTERED" => Some(Self::Registered),
            "INCOMING_CALL" => Some(Self::IncomingCall),
            "TARGET_UNAVAILABLE" => Some(Self::TargetUnavailable),
            "CALL_ACCEPTED" => Some(Self::CallAccepted),
            "CALL_REJECTED" => Some(Self::CallRejected),
            "CALL_ENDED" => Some(Self::CallEnded),
            "CALL_FAILED" => Some(Self::CallFailed),
            _ => None,
        }
    }
}

impl fmt::Display for ServerEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ServerEventType> for String {
    fn from(event: ServerEventType) -> Self {
        event.as_str().to_string()
    }
}
