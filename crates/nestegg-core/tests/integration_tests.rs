//! Integration tests for nestegg-core
//!
//! These tests exercise the full record → score → snapshot → trend workflow.

use chrono::NaiveDate;
use nestegg_core::{
    db::Database,
    health::{should_persist, HealthScoreEngine, RecordOutcome, SnapshotRecorder},
    models::{NewTransaction, TransactionType},
    HealthSettings, SnapshotWrite,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add(db: &Database, tx: NewTransaction) -> i64 {
    db.insert_transaction(&tx).expect("Failed to insert transaction")
}

/// Seeds a database so that June 2024 reproduces the reference scenario:
/// savings 20% of income, 120% of budget spent, no debt, three equal
/// spending days, and exactly six months of average expenses in the balance.
fn seed_reference_month(db: &Database) {
    // January..May: 4000 in, 2160 out
    for month in 1..=5 {
        add(
            db,
            NewTransaction::new(TransactionType::Income, 4000.0, date(2024, month, 1)),
        );
        add(
            db,
            NewTransaction::new(TransactionType::Expense, 2160.0, date(2024, month, 10)),
        );
    }

    let groceries = db.upsert_category("Groceries", None).unwrap();
    db.set_monthly_budget(groceries, 2024, 6, 1000.0).unwrap();

    add(
        db,
        NewTransaction::new(TransactionType::Income, 5000.0, date(2024, 6, 1)),
    );
    add(
        db,
        NewTransaction::new(TransactionType::Savings, 1000.0, date(2024, 6, 2)),
    );
    for day in [3, 4, 5] {
        add(
            db,
            NewTransaction::new(TransactionType::Expense, 400.0, date(2024, 6, day))
                .with_category(groceries),
        );
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_reference_month_scores_95() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    seed_reference_month(&db);

    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let inputs = engine.monthly_inputs(2024, 6).unwrap();

    assert_eq!(inputs.income, 5000.0);
    assert_eq!(inputs.savings, 1000.0);
    assert_eq!(inputs.planned_budget, 1000.0);
    assert_eq!(inputs.spent_budget, 1200.0);
    assert_eq!(inputs.daily_spending.len(), 3);
    assert!(inputs.daily_spending.values().all(|&v| v == 400.0));
    assert_eq!(inputs.total_debt, 0.0);

    // 25000 income - 12000 expenses - 1000 savings, over 2000 a month
    assert_eq!(inputs.current_balance, 12_000.0);
    assert_eq!(inputs.avg_monthly_expenses, 2000.0);

    let report = engine.score_month(2024, 6).unwrap();
    assert_eq!(report.components.savings_rate.score, 100.0);
    assert!((report.components.budget_adherence.score - 80.0).abs() < 1e-9);
    assert_eq!(report.components.debt_progress.score, 100.0);
    assert_eq!(report.components.spending_stability.score, 100.0);
    assert!((report.components.emergency_fund.value - 6.0).abs() < 1e-9);
    assert!((report.components.emergency_fund.score - 99.6).abs() < 1e-9);
    // round(30 + 20 + 20 + 15 + 9.96)
    assert_eq!(report.total_score, 95);
    assert_eq!(report.prev_score, None);
}

#[test]
fn test_debt_payments_drive_debt_progress() {
    let db = Database::in_memory().unwrap();
    let loan = db.create_debt("Car loan", 10_000.0).unwrap();
    db.record_debt_payment(loan, 100.0, date(2024, 4, 15), None, None)
        .unwrap();

    let engine = HealthScoreEngine::new(&db, HealthSettings::default());

    let april = engine.score_month(2024, 4).unwrap();
    assert!((april.components.debt_progress.value - 1.0).abs() < 1e-9);
    assert!((april.components.debt_progress.score - 50.0).abs() < 1e-9);

    // No payment in May
    let may = engine.score_month(2024, 5).unwrap();
    assert_eq!(may.components.debt_progress.score, 0.0);
}

#[test]
fn test_category_default_budget_applies() {
    let db = Database::in_memory().unwrap();
    let dining = db.upsert_category("Dining", Some(200.0)).unwrap();
    add(
        &db,
        NewTransaction::new(TransactionType::Expense, 300.0, date(2024, 8, 9))
            .with_category(dining),
    );

    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let report = engine.score_month(2024, 8).unwrap();

    // 50% over budget
    assert!((report.components.budget_adherence.score - 50.0).abs() < 1e-9);
    assert!((report.components.budget_adherence.value - 150.0).abs() < 1e-9);
}

#[test]
fn test_financial_month_start_day_shifts_window() {
    let db = Database::in_memory().unwrap();
    add(
        &db,
        NewTransaction::new(TransactionType::Income, 3000.0, date(2024, 2, 20)),
    );
    add(
        &db,
        NewTransaction::new(TransactionType::Savings, 600.0, date(2024, 3, 5)),
    );

    // Calendar months split income and savings apart
    let calendar = HealthScoreEngine::new(&db, HealthSettings::default());
    assert_eq!(
        calendar.score_month(2024, 3).unwrap().components.savings_rate.score,
        0.0
    );

    // A month starting on the 15th puts both in February's window
    let settings = HealthSettings::with_month_start_day(15).unwrap();
    let shifted = HealthScoreEngine::new(&db, settings);
    let february = shifted.score_month(2024, 2).unwrap();
    assert!((february.components.savings_rate.value - 20.0).abs() < 1e-9);
    assert_eq!(february.components.savings_rate.score, 100.0);
}

// =============================================================================
// Snapshots and trend
// =============================================================================

#[test]
fn test_record_then_prev_score() {
    let db = Database::in_memory().unwrap();
    seed_reference_month(&db);

    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let recorder = SnapshotRecorder::new();
    let today = date(2024, 7, 3);

    let june = engine.score_month(2024, 6).unwrap();
    let outcome = recorder.record(&db, &june, today);
    assert!(matches!(
        outcome,
        RecordOutcome::Written(SnapshotWrite::Inserted(_))
    ));

    let july = engine.score_month(2024, 7).unwrap();
    assert_eq!(july.prev_score, Some(95));
}

#[test]
fn test_prev_score_crosses_year_boundary() {
    let db = Database::in_memory().unwrap();
    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let recorder = SnapshotRecorder::new();

    let december = engine.score_month(2023, 12).unwrap();
    recorder.record(&db, &december, date(2024, 1, 10));

    let january = engine.score_month(2024, 1).unwrap();
    assert_eq!(january.prev_score, Some(december.total_score));
}

#[test]
fn test_future_months_never_persisted() {
    let db = Database::in_memory().unwrap();
    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let recorder = SnapshotRecorder::new();
    let today = date(2024, 3, 31);

    assert!(!should_persist(2024, 4, today));

    let april = engine.score_month(2024, 4).unwrap();
    assert_eq!(
        recorder.record(&db, &april, today),
        RecordOutcome::SkippedFuture
    );
    assert!(db.get_health_snapshot(2024, 4).unwrap().is_none());
}

#[test]
fn test_rescoring_keeps_one_snapshot_per_month() {
    let db = Database::in_memory().unwrap();
    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let today = date(2024, 5, 20);

    add(
        &db,
        NewTransaction::new(TransactionType::Income, 2000.0, date(2024, 5, 1)),
    );

    // Separate recorders, as with repeated CLI runs
    let first = SnapshotRecorder::new()
        .record(&db, &engine.score_month(2024, 5).unwrap(), today);

    add(
        &db,
        NewTransaction::new(TransactionType::Savings, 400.0, date(2024, 5, 2)),
    );
    let second = SnapshotRecorder::new()
        .record(&db, &engine.score_month(2024, 5).unwrap(), today);

    let (RecordOutcome::Written(a), RecordOutcome::Written(b)) = (first, second) else {
        panic!("expected two writes, got {:?} and {:?}", first, second);
    };
    assert_eq!(a.id(), b.id());

    let snapshots = db.list_health_snapshots(2024).unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(
        snapshots[0].total_score,
        engine.score_month(2024, 5).unwrap().total_score
    );
}

#[test]
fn test_trend_from_recorded_months() {
    let db = Database::in_memory().unwrap();
    let engine = HealthScoreEngine::new(&db, HealthSettings::default());
    let recorder = SnapshotRecorder::new();
    let today = date(2024, 3, 15);

    // January: no savings. February: 10% saved. March: 20% saved.
    let months = [(1, 0.0), (2, 300.0), (3, 600.0)];
    for (month, saved) in months {
        add(
            &db,
            NewTransaction::new(TransactionType::Income, 3000.0, date(2024, month, 1)),
        );
        if saved > 0.0 {
            add(
                &db,
                NewTransaction::new(TransactionType::Savings, saved, date(2024, month, 2)),
            );
        }
        let report = engine.score_month(2024, month).unwrap();
        recorder.record(&db, &report, today);
    }

    let trend = engine.trend_as_of(2024, today).unwrap();
    assert_eq!(trend.len(), 12);

    let actuals: Vec<Option<u8>> = trend.iter().take(3).map(|p| p.actual).collect();
    assert_eq!(actuals, vec![Some(70), Some(85), Some(100)]);

    assert_eq!(trend[0].predicted, None);
    assert_eq!(trend[2].predicted, Some(100));
    // Rising line, clamped at the top
    assert_eq!(trend[3].predicted, Some(100));
    assert!(trend[3].is_future);
    assert!(trend[3..].iter().all(|p| p.actual.is_none()));
}
