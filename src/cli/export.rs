//! Export command.
//!
//! Prints fetched secrets as .env-formatted text on stdout, suitable for
//! piping or redirection.

use crate::core::vault::{Options, Vault};
use crate::error::Result;

/// Fetch secrets and print them as .env text.
pub async fn execute(options: &Options) -> Result<()> {
    let vault = Vault::open(options)?;
    let env = vault.fetch_env().await?;
    print!("{}", env.to_env_string());
    Ok(())
}
