//! Relay operation codes
//!
//! Defines all WebSocket op codes the relay understands.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Relay operation codes
///
/// Op codes define the type of message being sent or received over the WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Server dispatches an event to the client (server only)
    Dispatch = 0,
    /// Register an identifier for this connection (client only)
    Register = 1,
    /// Ask the relay to ring another identifier (client only)
    InitiateCall = 2,
    /// Accept a pending call (client only)
    AcceptCall = 3,
    /// Reject a pending call (client only)
    RejectCall = 4,
    /// Hang up an active call (client only)
    EndCall = 5,
}

impl OpCode {
    /// Create an `OpCode` from a raw integer value
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Dispatch),
            1 => Some(Self::Register),
            2 => Some(Self::InitiateCall),
            3 => Some(Self::AcceptCall),
            4 => Some(Self::RejectCall),
            5 => Some(Self::EndCall),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this op code can be sent by the client
    #[must_use]
    pub const fn is_client_op(self) -> bool {
        matches!(
            self,
            Self::Register | Self::InitiateCall | Self::AcceptCall | Self::RejectCall | Self::EndCall
        )
    }

    /// Check if this op code can be sent by the server
    #[must_use]
    pub const fn is_server_op(self) -> bool {
        matches!(self, Self::Dispatch)
    }

    /// Get the name of this op code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dispatch => "Dispatch",
            Self::Register => "Register",
            Self::InitiateCall => "InitiateCall",
            Self::AcceptCall => "AcceptCall",
            Self::RejectCall => "RejectCall",
            Self::EndCall => "EndCall",
        }
    }
}

impl Serialize for OpCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for OpCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value).ok_or_else(|| serde::de::Error::custom(format!("invalid op code: {value}")))
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}
