//! Relay events
//!
//! Defines all dispatch events sent by the relay to clients.

mod event_types;
mod payloads;

pub use event_types::ServerEventType;
pub use payloads::{
    CallAcceptedEvent, CallEndedEvent, CallFailedEvent, CallRejectedEvent, IncomingCallEvent,
    RegisteredEvent, TargetUnavailableEvent,
};
