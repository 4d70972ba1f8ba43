//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod accounts;
pub mod currencies;
pub mod health;
pub mod statements;
pub mod transactions;
pub mod users;

// Re-export all handlers for use in router
pub use accounts::*;
pub use currencies::*;
pub use health::*;
pub use statements::*;
pub use transactions::*;
pub use users::*;
