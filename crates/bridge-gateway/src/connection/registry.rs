//! Presence registry
//!
//! Maps registered identifiers to live connections using DashMap for
//! thread-safe access. Entries live exactly as long as the socket: there
//! is no expiry timer and no persistence.

use super::Connection;
use dashmap::DashMap;
use std::sync::Arc;

/// Maps registered identifiers to live connections
///
/// Invariants: at most one connection per identifier (the most recent
/// registration wins), and at most one identifier per connection
/// (registering a new identifier on a connection drops its old entry).
pub struct PresenceRegistry {
    /// Active entries by identifier
    entries: DashMap<String, Arc<Connection>>,
}

impl PresenceRegistry {
    /// Create a new presence registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Create a new presence registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register an identifier for a connection
    ///
    /// Any entry the connection held under another identifier is removed
    /// first (reverse scan over values). If another connection held this
    /// identifier, it is displaced and returned.
    pub fn register(&self, identifier: &str, connection: &Arc<Connection>) -> Option<Arc<Connection>> {
        self.entries.retain(|id, conn| {
            id == identifier || conn.connection_id() != connection.connection_id()
        });

        let replaced = self.entries.insert(identifier.to_string(), Arc::clone(connection));
        connection.set_identifier(identifier);

        let replaced = replaced.filter(|old| old.connection_id() != connection.connection_id());
        if let Some(old) = &replaced {
            tracing::debug!(
                identifier = %identifier,
                old_connection_id = %old.connection_id(),
                new_connection_id = %connection.connection_id(),
                "Identifier re-registered on a new connection"
            );
        } else {
            tracing::debug!(
                identifier = %identifier,
                connection_id = %connection.connection_id(),
                "Identifier registered"
            );
        }

        replaced
    }

    /// Remove every entry held by a connection (reverse scan over values)
    pub fn remove_connection(&self, connection: &Connection) {
        let before = self.entries.len();
        self.entries
            .retain(|_, conn| conn.connection_id() != connection.connection_id());

        if self.entries.len() < before {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                "Presence entries removed for connection"
            );
        }
    }

    /// Look up the connection registered under an identifier
    pub fn lookup(&self, identifier: &str) -> Option<Arc<Connection>> {
        self.entries.get(identifier).map(|r| Arc::clone(&r))
    }

    /// Check if an identifier is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Find the identifier a connection is registered under (reverse scan)
    pub fn identifier_of(&self, connection: &Connection) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.value().connection_id() == connection.connection_id())
            .map(|entry| entry.key().clone())
    }

    /// Get the number of registered identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
