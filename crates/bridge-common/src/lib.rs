//! # bridge-common
//!
//! Shared utilities including configuration, error handling, telemetry,
//! and the voice-token issuer seam.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod token;

// Re-export commonly used types at crate root
pub use config::{AppConfig, AppSettings, ConfigError, Environment, ServerConfig, VoiceTokenConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
pub use token::{HsTokenIssuer, TokenIssuer, TokenIssuerError, VoiceGrant};
