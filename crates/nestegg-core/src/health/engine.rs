//! Health score engine
//!
//! Ties the store to the pure scoring pipeline. Both queries are read-only;
//! recording a snapshot is left to [`SnapshotRecorder`](super::SnapshotRecorder).

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::monthly::{previous_month, FinancialMonth, MonthlyInputs};
use super::trend::project_trend;
use super::types::{HealthScoreReport, TrendPoint};
use crate::db::Database;
use crate::error::Result;
use crate::settings::HealthSettings;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Computes health scores and trends from the database
pub struct HealthScoreEngine<'a> {
    db: &'a Database,
    settings: HealthSettings,
}

impl<'a> HealthScoreEngine<'a> {
    pub fn new(db: &'a Database, settings: HealthSettings) -> Self {
        Self { db, settings }
    }

    pub fn settings(&self) -> &HealthSettings {
        &self.settings
    }

    /// Gather the raw aggregates for a financial month
    pub fn monthly_inputs(&self, year: i32, month: u32) -> Result<MonthlyInputs> {
        let window = FinancialMonth::new(year, month, self.settings.month_start_day)?;

        let window_transactions = self.db.transactions_between(window.start(), window.end())?;
        let history = self.db.list_all_transactions()?;
        let budgets = self.db.effective_budgets(year, month)?;
        let debts = self.db.list_debts()?;

        debug!(
            year,
            month,
            from = %window.start(),
            to = %window.end(),
            transactions = window_transactions.len(),
            "Building monthly inputs"
        );

        Ok(MonthlyInputs::build(
            &window,
            &window_transactions,
            &history,
            &budgets,
            &debts,
        ))
    }

    /// Score a month
    ///
    /// `prev_score` is the stored total for the preceding calendar month.
    pub fn score_month(&self, year: i32, month: u32) -> Result<HealthScoreReport> {
        let inputs = self.monthly_inputs(year, month)?;
        let (total_score, components) = inputs.score();

        let (prev_year, prev_month) = previous_month(year, month);
        let prev_score = self
            .db
            .get_health_snapshot(prev_year, prev_month)?
            .map(|s| s.total_score);

        Ok(HealthScoreReport {
            year,
            month,
            total_score,
            components,
            prev_score,
        })
    }

    /// Twelve-month trend for a year, relative to today
    pub fn trend(&self, year: i32) -> Result<Vec<TrendPoint>> {
        self.trend_as_of(year, today())
    }

    /// Twelve-month trend for a year, relative to `today`
    pub fn trend_as_of(&self, year: i32, today: NaiveDate) -> Result<Vec<TrendPoint>> {
        let snapshots = self.db.list_health_snapshots(year)?;
        Ok(project_trend(year, &snapshots, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(db: &Database, kind: TransactionType, amount: f64, on: NaiveDate) {
        db.insert_transaction(&NewTransaction::new(kind, amount, on))
            .unwrap();
    }

    #[test]
    fn test_score_month_reads_window() {
        let db = Database::in_memory().unwrap();
        add(&db, TransactionType::Income, 4000.0, date(2024, 5, 1));
        add(&db, TransactionType::Savings, 800.0, date(2024, 5, 2));
        // Next month, must not count toward May
        add(&db, TransactionType::Savings, 5000.0, date(2024, 6, 1));

        let engine = HealthScoreEngine::new(&db, HealthSettings::default());
        let report = engine.score_month(2024, 5).unwrap();

        assert_eq!(report.year, 2024);
        assert_eq!(report.month, 5);
        assert!((report.components.savings_rate.value - 20.0).abs() < 1e-9);
        assert_eq!(report.prev_score, None);
    }

    #[test]
    fn test_score_month_respects_start_day() {
        let db = Database::in_memory().unwrap();
        // Falls in the financial month that starts on 2024-04-25
        add(&db, TransactionType::Income, 3000.0, date(2024, 4, 26));

        let shifted = HealthScoreEngine::new(&db, HealthSettings::with_month_start_day(25).unwrap());
        let april = shifted.monthly_inputs(2024, 4).unwrap();
        assert_eq!(april.income, 3000.0);

        let calendar = HealthScoreEngine::new(&db, HealthSettings::default());
        assert_eq!(calendar.monthly_inputs(2024, 4).unwrap().income, 3000.0);
        assert_eq!(shifted.monthly_inputs(2024, 3).unwrap().income, 0.0);
    }

    #[test]
    fn test_score_month_does_not_write() {
        let db = Database::in_memory().unwrap();
        add(&db, TransactionType::Income, 1000.0, date(2024, 2, 3));

        let engine = HealthScoreEngine::new(&db, HealthSettings::default());
        engine.score_month(2024, 2).unwrap();

        assert!(db.list_health_snapshots(2024).unwrap().is_empty());
    }

    #[test]
    fn test_prev_score_wraps_to_december() {
        let db = Database::in_memory().unwrap();
        let engine = HealthScoreEngine::new(&db, HealthSettings::default());

        let december = engine.score_month(2023, 12).unwrap();
        db.upsert_health_snapshot(
            2023,
            12,
            december.total_score,
            &december.components.to_scores(),
        )
        .unwrap();

        let january = engine.score_month(2024, 1).unwrap();
        assert_eq!(january.prev_score, Some(december.total_score));
    }

    #[test]
    fn test_trend_as_of_uses_snapshots() {
        let db = Database::in_memory().unwrap();
        let engine = HealthScoreEngine::new(&db, HealthSettings::default());
        let scores = engine.score_month(2024, 1).unwrap().components.to_scores();
        db.upsert_health_snapshot(2024, 1, 60, &scores).unwrap();
        db.upsert_health_snapshot(2024, 2, 70, &scores).unwrap();

        let trend = engine.trend_as_of(2024, date(2024, 2, 10)).unwrap();
        assert_eq!(trend.len(), 12);
        assert_eq!(trend[1].actual, Some(70));
        assert_eq!(trend[1].predicted, Some(70));
        assert_eq!(trend[2].predicted, Some(80));
        assert!(trend[2].is_future);
    }
}
