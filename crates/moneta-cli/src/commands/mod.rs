//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status) and shared utilities (open_db)
//! - `entities` - User and account management commands
//! - `import` - Statement import command
//! - `serve` - Web server command
//! - `transactions` - Transaction listing command

pub mod core;
pub mod entities;
pub mod import;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use entities::*;
pub use import::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of chars, adding "..." if truncated
///
/// Counts chars rather than bytes so multibyte descriptions never split
/// inside a character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
