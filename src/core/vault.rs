//! Vault.
//!
//! The primary interface for a configuration call: open a handle from
//! options, fetch the encrypted bundle, unwrap both envelope layers, and
//! parse the result. `config` is the one-shot convenience that also
//! updates the process-wide session.

use tracing::debug;

use crate::core::client::Client;
use crate::core::constants::{DEFAULT_SERVER_URL, SERVER_URL_ENV, TOKEN_ENV};
use crate::core::env::Env;
use crate::core::envelope;
use crate::core::session;
use crate::core::token::AccessToken;
use crate::error::{Result, TokenError};

/// Options for a configuration call.
#[derive(Debug, Clone)]
pub struct Options {
    /// Access token; falls back to `WARREN_TOKEN`.
    pub token: Option<String>,
    /// Server URL; falls back to `WARREN_SERVER_URL`, then the default.
    pub server_url: Option<String>,
    /// Write resolved keys into the process environment (default true).
    pub populate_process_env: bool,
    /// Replace process-environment values that already exist (default false).
    pub override_existing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            token: None,
            server_url: None,
            populate_process_env: true,
            override_existing: false,
        }
    }
}

/// An opened handle on a remote warren: a validated token plus a client
/// for its server.
#[derive(Debug)]
pub struct Vault {
    token: AccessToken,
    client: Client,
}

impl Vault {
    /// Open a vault handle from options and environment fallbacks.
    ///
    /// Validates the token shape and server URL up front; nothing touches
    /// the network until [`Vault::fetch_env`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Missing` when no token is available,
    /// `TokenError::InvalidFormat` for a malformed one, and
    /// `ResolveError::InvalidUrl` for an unusable server URL.
    pub fn open(options: &Options) -> Result<Self> {
        let raw = match &options.token {
            Some(token) => token.clone(),
            None => std::env::var(TOKEN_ENV).map_err(|_| TokenError::Missing)?,
        };
        let token: AccessToken = raw.parse()?;

        let server_url = options
            .server_url
            .clone()
            .or_else(|| std::env::var(SERVER_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        debug!(identifier = %token.identifier(), server = %server_url, "vault opened");

        Ok(Self {
            client: Client::new(&server_url)?,
            token,
        })
    }

    /// Fetch the bundle and unwrap it into a parsed environment.
    ///
    /// One outbound request, then two sequential authenticated
    /// decryptions. Fails entirely on the first error; no partial mapping
    /// is ever produced.
    pub async fn fetch_env(&self) -> Result<Env> {
        let bundle = self.client.fetch(&self.token).await?;
        let plaintext = envelope::unwrap(&bundle, self.token.secret_material())?;
        let env = Env::parse(&plaintext);
        debug!(vars = env.len(), "environment resolved");
        Ok(env)
    }
}

/// Resolve, decrypt, and parse secrets, then update the process session.
///
/// This is the full configuration operation: the returned [`Env`] is the
/// caller's own copy, a clone is retained for [`crate::current`] /
/// [`crate::get`], and with `populate_process_env` set the keys are
/// injected into the process environment honoring `override_existing`.
/// The fetched mapping is returned as-is; ambient process variables are
/// never merged into it.
///
/// # Errors
///
/// Any token, resolve, or decrypt failure fails the whole call; no
/// partial environment is stored or injected.
pub async fn config(options: Options) -> Result<Env> {
    let vault = Vault::open(&options)?;
    let env = vault.fetch_env().await?;
    session::store(&env, options.populate_process_env, options.override_existing);
    Ok(env)
}
