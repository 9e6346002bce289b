//! Warren - fetch, decrypt, and inject secrets from a remote warren.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Run a command with fetched secrets injected
//! │   ├── export        # Print secrets as .env text
//! │   ├── get           # Print a single value
//! │   ├── check         # Fetch and report without printing values
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── token         # Access token parsing (identifier.secret)
//!     ├── client        # Secrets service HTTP client
//!     ├── bundle        # Wire model and packed iv:tag:ciphertext grammar
//!     ├── envelope      # Two-layer AES-256-GCM decryption
//!     ├── env           # Dotenv-style parsing of decrypted plaintext
//!     ├── session       # Process-wide state and env injection
//!     └── vault         # The configuration pipeline
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo() -> warren::Result<()> {
//! let env = warren::config(warren::Options {
//!     token: Some("proj_42.s3cr3t".into()),
//!     ..Default::default()
//! })
//! .await?;
//!
//! assert_eq!(env.get("API_KEY"), warren::get("API_KEY")?.as_deref());
//! # Ok(())
//! # }
//! ```
//!
//! A token unlocks two envelope layers: its secret half decrypts the
//! per-token project key, and the project key decrypts the secrets
//! themselves. Both layers are authenticated before anything is trusted.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::env::Env;
pub use crate::core::session::{current, get};
pub use crate::core::vault::{config, Options, Vault};
pub use crate::error::{Error, Result};
