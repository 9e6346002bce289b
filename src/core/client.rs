//! Secrets service client.
//!
//! Performs the single authenticated fetch of the encrypted bundle. No
//! retries live here; a failed fetch is a hard failure of the
//! configuration call, never "no secrets".

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::core::bundle::SecretBundle;
use crate::core::constants::SECRETS_PATH;
use crate::core::token::AccessToken;
use crate::error::ResolveError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote secrets service.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client for the given server URL.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidUrl` if the URL does not parse as an
    /// http(s) endpoint.
    pub fn new(server_url: &str) -> Result<Self, ResolveError> {
        let parsed = reqwest::Url::parse(server_url)
            .map_err(|_| ResolveError::InvalidUrl(server_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::InvalidUrl(server_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ResolveError::Transport)?;

        Ok(Self {
            http,
            base_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the encrypted bundle for a token.
    ///
    /// Exactly one outbound request. The full token is the bearer value,
    /// per the service contract; it appears nowhere else and is never
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Service` for non-success responses (carrying
    /// the upstream JSON `message` when the service supplies one) and
    /// `ResolveError::Transport` for network-level failures.
    #[instrument(skip_all, fields(identifier = %token.identifier()))]
    pub async fn fetch(&self, token: &AccessToken) -> Result<SecretBundle, ResolveError> {
        let url = format!("{}{}", self.base_url, SECRETS_PATH);
        debug!(url = %url, "fetching secret bundle");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.bearer())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "service responded");

        if !status.is_success() {
            return Err(ResolveError::Service {
                status: status.as_u16(),
                message: upstream_message(status, response).await,
            });
        }

        let bundle = response.json::<SecretBundle>().await?;
        Ok(bundle)
    }
}

/// Pull the `message` field out of an error body, falling back to the
/// canonical status reason.
async fn upstream_message(status: StatusCode, response: reqwest::Response) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

/// Resolve a raw token against a server: validate shape, then fetch.
///
/// The token is parsed before anything touches the network, so a
/// malformed token never produces an outbound request.
///
/// # Errors
///
/// Returns `TokenError::InvalidFormat` (as `Error::Token`) for malformed
/// tokens and any `ResolveError` from the fetch.
pub async fn resolve(
    raw_token: &str,
    server_url: &str,
) -> crate::error::Result<(SecretBundle, AccessToken)> {
    let token: AccessToken = raw_token.parse()?;
    let client = Client::new(server_url)?;
    let bundle = client.fetch(&token).await?;
    Ok((bundle, token))
}
