//! Command-line interface.

pub mod check;
pub mod completions;
pub mod export;
pub mod get;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::vault::Options;
use crate::error::Result;

/// Warren - fetch, decrypt, and inject secrets from a remote warren.
#[derive(Parser)]
#[command(
    name = "warren",
    about = "Fetch, decrypt, and inject secrets from a remote warren",
    version
)]
pub struct Cli {
    /// Access token (<identifier>.<secret>)
    #[arg(
        long,
        global = true,
        env = constants::TOKEN_ENV,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Secrets server URL
    #[arg(long, global = true, env = constants::SERVER_URL_ENV)]
    pub server_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a command with fetched secrets injected as env vars
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Print fetched secrets as .env format
    Export,

    /// Print a single secret value
    Get {
        /// Secret key (e.g. DATABASE_URL)
        key: String,
    },

    /// Fetch and verify secrets without printing any values
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Cli {
    /// Library options for this invocation.
    ///
    /// CLI commands never mutate their own process environment; `run`
    /// injects into the child process only.
    pub fn options(&self) -> Options {
        Options {
            token: self.token.clone(),
            server_url: self.server_url.clone(),
            populate_process_env: false,
            override_existing: false,
        }
    }
}

/// Execute a parsed command.
pub async fn execute(command: Command, options: Options) -> Result<()> {
    match command {
        Command::Run { command } => run::execute(&options, &command).await,
        Command::Export => export::execute(&options).await,
        Command::Get { key } => get::execute(&options, &key).await,
        Command::Check => check::execute(&options).await,
        Command::Completions { shell } => completions::execute(shell),
    }
}
