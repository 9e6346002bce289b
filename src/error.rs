//! Error types for the warren pipeline.
//!
//! Each failure kind is a distinct variant so callers can branch on what
//! went wrong without matching on message strings. The top-level [`Error`]
//! groups variants by pipeline stage and keeps a stable display prefix per
//! stage.

use thiserror::Error;

/// Top-level error for a configuration call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("token: {0}")]
    Token(#[from] TokenError),

    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),

    #[error("decrypt: {0}")]
    Decrypt(#[from] DecryptError),

    #[error("not configured: call config() first")]
    NotConfigured,

    #[error("{0}")]
    Other(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Access token failures. Raised before any network call is made.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("no token provided: set {env} or pass one explicitly", env = crate::core::constants::TOKEN_ENV)]
    Missing,

    #[error("invalid token format: expected \"<identifier>.<secret>\"")]
    InvalidFormat,
}

/// Failures while fetching the encrypted bundle from the secrets service.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failures while unwrapping the two-layer envelope.
///
/// `MalformedBundle` is strictly structural (component count, hex
/// validity, IV/tag sizes). A structurally valid bundle that fails tag
/// verification is `AuthenticationFailed`; the two are never conflated.
#[derive(Error, Debug)]
pub enum DecryptError {
    #[error("malformed encrypted bundle: {0}")]
    MalformedBundle(String),

    #[error("authentication failed: ciphertext rejected")]
    AuthenticationFailed,

    #[error("decrypted payload is not valid UTF-8")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, Error>;
