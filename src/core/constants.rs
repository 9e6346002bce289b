//! Constants used throughout warren.
//!
//! Centralizes magic strings and configuration values.

/// Environment variable holding the access token (WARREN_TOKEN).
pub const TOKEN_ENV: &str = "WARREN_TOKEN";

/// Environment variable holding the server URL (WARREN_SERVER_URL).
pub const SERVER_URL_ENV: &str = "WARREN_SERVER_URL";

/// Server URL used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3333";

/// Path of the secrets endpoint, relative to the server URL.
pub const SECRETS_PATH: &str = "/api/secrets/token";

/// Environment variable controlling log filtering (WARREN_LOG).
pub const LOG_ENV: &str = "WARREN_LOG";
