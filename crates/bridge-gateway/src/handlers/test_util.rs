//! Shared fixtures for handler tests

use crate::connection::{Connection, PresenceRegistry};
use crate::protocol::SignalMessage;
use crate::server::GatewayState;
use async_trait::async_trait;
use bridge_common::{
    AppConfig, AppSettings, Environment, ServerConfig, TokenIssuer, TokenIssuerError, VoiceGrant,
    VoiceTokenConfig,
};
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "signbridge".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        voice_token: VoiceTokenConfig {
            app_id: "test-app".to_string(),
            app_certificate: "test-certificate-that-is-long-enough".to_string(),
            expiry_secs: 3600,
        },
    }
}

pub fn state_with_issuer(issuer: Arc<dyn TokenIssuer>) -> GatewayState {
    GatewayState::new(PresenceRegistry::new_shared(), issuer, test_config())
}

pub fn test_state() -> GatewayState {
    state_with_issuer(Arc::new(StubIssuer))
}

pub fn make_connection(id: &str) -> (Arc<Connection>, mpsc::Receiver<SignalMessage>) {
    let (tx, rx) = mpsc::channel(10);
    (Connection::new(id.to_string(), tx), rx)
}

/// Issuer returning a deterministic token per session
pub struct StubIssuer;

#[async_trait]
impl TokenIssuer for StubIssuer {
    async fn issue(&self, session_name: &str) -> Result<VoiceGrant, TokenIssuerError> {
        Ok(VoiceGrant {
            token: format!("stub-token-{session_name}"),
            expires_at: 4_102_444_800,
        })
    }
}

/// Issuer that always fails
pub struct FailingIssuer;

#[async_trait]
impl TokenIssuer for FailingIssuer {
    async fn issue(&self, _session_name: &str) -> Result<VoiceGrant, TokenIssuerError> {
        Err(TokenIssuerError::Unavailable("issuer offline".to_string()))
    }
}
