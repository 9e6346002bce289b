//! Warren - fetch, decrypt, and inject secrets from a remote warren.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use warren::cli::output;
use warren::cli::{execute, Cli};
use warren::core::constants;
use warren::error::{Error, ResolveError, TokenError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("warren=debug")
        } else {
            EnvFilter::new("warren=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    let options = cli.options();
    if let Err(e) = execute(cli.command, options).await {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Token(TokenError::Missing) => {
                Some(format!("set {} or pass --token", constants::TOKEN_ENV))
            }
            Error::Resolve(ResolveError::Service {
                status: 401 | 403, ..
            }) => Some("check that the token is valid for this server".to_string()),
            Error::Resolve(ResolveError::Transport(_)) => Some(format!(
                "check {} or pass --server-url",
                constants::SERVER_URL_ENV
            )),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
