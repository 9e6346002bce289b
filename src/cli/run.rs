//! Run command.
//!
//! Executes a command with fetched secrets injected as environment
//! variables. Secrets are decrypted in-memory, handed to the child
//! process only, and never written to disk.

use zeroize::Zeroizing;

use crate::core::env::Env;
use crate::core::vault::{Options, Vault};
use crate::error::{Error, Result};

/// Run a command with secrets injected as environment variables.
pub async fn execute(options: &Options, command: &[String]) -> Result<()> {
    let vault = Vault::open(options)?;
    let env = vault.fetch_env().await?;
    let exit_code = run_with_secrets(&env, command)?;
    std::process::exit(exit_code);
}

fn run_with_secrets(env: &Env, command: &[String]) -> Result<i32> {
    if command.is_empty() {
        return Err(Error::Other("no command specified".to_string()));
    }

    let mut cmd = std::process::Command::new(&command[0]);
    cmd.args(&command[1..]);

    // Zeroizing copies are wiped once the child has been spawned
    for (key, value) in env.iter() {
        let value = Zeroizing::new(value.to_string());
        cmd.env(key, value.as_str());
    }

    let status = cmd.status()?;
    Ok(status.code().unwrap_or(1))
}
