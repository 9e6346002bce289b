//! Shared CLI output helpers for consistent terminal output.
//!
//! Styling goes through `console`, which disables colors on non-terminal
//! streams and honors the usual color environment knobs. Values of
//! secrets are never printed by these helpers; callers that do print
//! values (`export`, `get`) write to stdout directly.

use std::fmt::Display;

use console::style;

/// Print a success message with checkmark (green).
///
/// Example: `✓ 4 secrets verified`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ token: invalid token format`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ set WARREN_TOKEN or pass --token`
pub fn hint(msg: &str) {
    eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  server:  http://localhost:3333`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        style(label).dim(),
        style(value.to_string()).bold()
    );
}

/// Print a list item with bullet.
///
/// Example: `  • DATABASE_URL`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}
