//! Check command.
//!
//! Fetches and decrypts the bundle end-to-end, reporting what was found
//! without ever printing a value. Useful for verifying a token and server
//! in CI or during setup.

use crate::cli::output;
use crate::core::vault::{Options, Vault};
use crate::error::Result;

/// Fetch and verify secrets, printing key names only.
pub async fn execute(options: &Options) -> Result<()> {
    let vault = Vault::open(options)?;
    let env = vault.fetch_env().await?;

    output::success(&format!(
        "{} secret{} fetched and decrypted",
        env.len(),
        if env.len() == 1 { "" } else { "s" }
    ));
    for key in env.keys() {
        output::list_item(key);
    }

    Ok(())
}
