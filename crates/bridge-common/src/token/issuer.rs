//! Voice-token issuer
//!
//! Issues time-limited credentials that let call participants join a voice
//! session. The issuer sits behind a trait so the gateway can swap in a
//! remote issuer or a test stub without touching the call flow.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::VoiceTokenConfig;

/// A credential granting access to one voice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceGrant {
    pub token: String,
    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// Token issuance errors
#[derive(Debug, thiserror::Error)]
pub enum TokenIssuerError {
    #[error("Failed to encode voice token")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("Token issuer unavailable: {0}")]
    Unavailable(String),
}

/// Issues voice-session credentials
///
/// Issuance may cross a network boundary, so the call is async and failures
/// are part of the contract.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, session_name: &str) -> Result<VoiceGrant, TokenIssuerError>;
}

/// Claims carried by an issued voice token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceClaims {
    /// Voice session the token is valid for
    pub channel: String,
    /// Participant role, always "publisher" for call parties
    pub role: String,
    /// Issuer (the application ID)
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// HS256-signing issuer backed by the application certificate
#[derive(Clone)]
pub struct HsTokenIssuer {
    encoding_key: EncodingKey,
    app_id: String,
    expiry_secs: i64,
}

impl HsTokenIssuer {
    /// Create a new issuer signing with the given certificate
    #[must_use]
    pub fn new(app_id: &str, app_certificate: &str, expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(app_certificate.as_bytes()),
            app_id: app_id.to_string(),
            expiry_secs,
        }
    }

    /// Create an issuer from the voice-token configuration
    #[must_use]
    pub fn from_config(config: &VoiceTokenConfig) -> Self {
        Self::new(&config.app_id, &config.app_certificate, config.expiry_secs)
    }
}

#[async_trait]
impl TokenIssuer for HsTokenIssuer {
    async fn issue(&self, session_name: &str) -> Result<VoiceGrant, TokenIssuerError> {
        let now = Utc::now();
        let expires_at = (now + Duration::seconds(self.expiry_secs)).timestamp();

        let claims = VoiceClaims {
            channel: session_name.to_string(),
            role: "publisher".to_string(),
            iss: self.app_id.clone(),
            iat: now.timestamp(),
            exp: expires_at,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(TokenIssuerError::Encoding)?;

        Ok(VoiceGrant { token, expires_at })
    }
}

impl std::fmt::Debug for HsTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HsTokenIssuer")
            .field("app_id", &self.app_id)
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}
