//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `context` - Shared context (config, table loading, report log) and the demo
//! - `views` - Home and events dashboards
//! - `reports` - Date filter, spending reports, cashback and investment
//! - `search` - Description searches

pub mod context;
pub mod reports;
pub mod search;
pub mod views;

// Re-export command functions for main.rs
pub use context::*;
pub use reports::*;
pub use search::*;
pub use views::*;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
