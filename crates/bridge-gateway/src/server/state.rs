//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::PresenceRegistry;
use bridge_common::{AppConfig, TokenIssuer};
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the relay.
#[derive(Clone)]
pub struct GatewayState {
    /// Identifier presence registry
    registry: Arc<PresenceRegistry>,
    /// Voice-session credential issuer
    token_issuer: Arc<dyn TokenIssuer>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        registry: Arc<PresenceRegistry>,
        token_issuer: Arc<dyn TokenIssuer>,
        config: AppConfig,
    ) -> Self {
        Self {
            registry,
            token_issuer,
            config: Arc::new(config),
        }
    }

    /// Get the presence registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// Get the voice-token issuer
    pub fn token_issuer(&self) -> &dyn TokenIssuer {
        &*self.token_issuer
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
