//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its state.

use crate::protocol::SignalMessage;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// A single WebSocket connection
pub struct Connection {
    /// Unique connection ID
    connection_id: String,

    /// Identifier registered on this connection (None until Register)
    ///
    /// Kept for logging and the Register acknowledgement; the registry
    /// remains the authoritative identifier -> connection mapping.
    identifier: RwLock<Option<String>>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<SignalMessage>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(connection_id: String, sender: mpsc::Sender<SignalMessage>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            identifier: RwLock::new(None),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Get the registered identifier (if any)
    pub fn identifier(&self) -> Option<String> {
        self.identifier.read().clone()
    }

    /// Set the registered identifier
    pub fn set_identifier(&self, identifier: impl Into<String>) {
        *self.identifier.write() = Some(identifier.into());
    }

    /// Check if the connection has registered an identifier
    pub fn is_registered(&self) -> bool {
        self.identifier.read().is_some()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: SignalMessage,
    ) -> Result<(), mpsc::error::SendError<SignalMessage>> {
        self.sender.send(message).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("identifier", &*self.identifier.read())
            .field("created_at", &self.created_at)
            .finish()
    }
}
