//! Get command.
//!
//! Prints a single secret value on stdout.

use crate::core::vault::{Options, Vault};
use crate::error::{Error, Result};

/// Fetch secrets and print the value for one key.
pub async fn execute(options: &Options, key: &str) -> Result<()> {
    let vault = Vault::open(options)?;
    let env = vault.fetch_env().await?;

    match env.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(Error::Other(format!("secret not found: {}", key))),
    }
}
