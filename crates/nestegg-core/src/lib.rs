//! Nestegg Core Library
//!
//! Shared functionality for the Nestegg budgeting tool:
//! - Database access and migrations (categories, transactions, budgets, debts)
//! - Layered user settings (financial month start day)
//! - Financial health score: component scorers, weighted total,
//!   monthly snapshots and a yearly trend projection

pub mod db;
pub mod error;
pub mod health;
pub mod models;
pub mod settings;

pub use db::{Database, SnapshotWrite};
pub use error::{Error, Result};
pub use health::{
    ComponentScore, FinancialMonth, HealthComponent, HealthComponents, HealthScoreEngine,
    HealthScoreReport, MonthlyInputs, RecordOutcome, SnapshotRecorder, TrendPoint,
};
pub use settings::HealthSettings;
