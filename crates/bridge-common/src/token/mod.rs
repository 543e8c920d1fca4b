//! Voice-token issuance

mod issuer;

pub use issuer::{HsTokenIssuer, TokenIssuer, TokenIssuerError, VoiceGrant};
