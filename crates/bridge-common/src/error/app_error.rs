//! Application error types
//!
//! Unified error handling for startup and shared services.

use crate::config::ConfigError;
use crate::token::TokenIssuerError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Voice-token issuer errors
    #[error("Token issuer error: {0}")]
    TokenIssuer(#[from] TokenIssuerError),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
