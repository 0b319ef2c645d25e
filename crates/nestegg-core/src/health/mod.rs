//! Financial health score
//!
//! A month's score is a weighted blend of five component scores:
//!
//! | Component          | Weight | Full marks at                     |
//! |--------------------|--------|-----------------------------------|
//! | Savings rate       | 30%    | 20% of income saved               |
//! | Budget adherence   | 25%    | spending at or under budget       |
//! | Debt progress      | 20%    | 2% of total debt repaid           |
//! | Spending stability | 15%    | identical spend every active day  |
//! | Emergency fund     | 10%    | ~6 months of expenses in balance  |
//!
//! Pipeline: records → [`MonthlyInputs`] → [`scorers`] → [`total_score`] →
//! (follow-up) [`SnapshotRecorder`] → [`project_trend`].

pub mod aggregate;
pub mod engine;
pub mod monthly;
pub mod scorers;
pub mod snapshot;
pub mod trend;
pub mod types;

pub use aggregate::total_score;
pub use engine::{today, HealthScoreEngine};
pub use monthly::{next_month, previous_month, FinancialMonth, MonthlyInputs};
pub use snapshot::{should_persist, RecordOutcome, SnapshotRecorder};
pub use trend::{project_trend, Projection};
pub use types::{ComponentScore, HealthComponent, HealthComponents, HealthScoreReport, TrendPoint};
