//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod categories;
pub mod debts;
pub mod health;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use categories::*;
pub use debts::*;
pub use health::*;
pub use transactions::*;
