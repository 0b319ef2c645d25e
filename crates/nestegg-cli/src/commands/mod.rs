//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, load_settings)
//! - `categories` - Category commands (list, add, delete)
//! - `transactions` - Transaction commands (list, add, delete)
//! - `budgets` - Monthly budget commands (list, set, delete)
//! - `debts` - Debt commands (list, add, pay, delete)
//! - `health` - Health score and trend reports
//! - `serve` - Web server command

pub mod budgets;
pub mod categories;
pub mod core;
pub mod debts;
pub mod health;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use categories::*;
pub use core::*;
pub use debts::*;
pub use health::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount with two decimals and a sign for negatives
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
