//! Snapshot recording
//!
//! Computing a score never writes. Persisting it is a separate follow-up
//! step run by [`SnapshotRecorder`] once the read has returned.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use super::types::HealthScoreReport;
use crate::db::{Database, SnapshotWrite};
use crate::models::ComponentScores;

/// Total and component scores, as stored in a snapshot row
type Recorded = (u8, ComponentScores);

/// Scores read back from the JSON column may differ in the last bit
const SCORE_EPSILON: f64 = 1e-9;

fn same_scores(a: &ComponentScores, b: &ComponentScores) -> bool {
    [
        (a.savings_rate, b.savings_rate),
        (a.budget_adherence, b.budget_adherence),
        (a.debt_progress, b.debt_progress),
        (a.spending_stability, b.spending_stability),
        (a.emergency_fund, b.emergency_fund),
    ]
    .iter()
    .all(|(x, y)| (x - y).abs() < SCORE_EPSILON)
}

/// Whether a score for (year, month) may be stored, given today's date
///
/// Months after the current calendar month are never persisted.
pub fn should_persist(year: i32, month: u32, today: NaiveDate) -> bool {
    (year, month) <= (today.year(), today.month())
}

/// What happened when recording a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Row written (inserted or updated)
    Written(SnapshotWrite),
    /// Same scores already recorded for this month, and still stored
    Unchanged,
    /// Month lies in the future
    SkippedFuture,
    /// Write failed; the error was logged
    Failed,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Persists health scores as monthly snapshots
///
/// Writes for the same (year, month) are serialized. A write is skipped only
/// when this recorder already stored the same total and component scores for
/// that month and the stored row still holds them. Failures are logged and
/// reported, never propagated.
#[derive(Debug, Default)]
pub struct SnapshotRecorder {
    /// Last recorded scores per (year, month), each behind its own lock
    slots: Mutex<HashMap<(i32, u32), Arc<Mutex<Option<Recorded>>>>>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, year: i32, month: u32) -> Arc<Mutex<Option<Recorded>>> {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry((year, month)).or_default())
    }

    /// Store `report` as the snapshot for its month
    pub fn record(
        &self,
        db: &Database,
        report: &HealthScoreReport,
        today: NaiveDate,
    ) -> RecordOutcome {
        let (year, month) = (report.year, report.month);

        if !should_persist(year, month, today) {
            debug!(year, month, "Not recording snapshot for future month");
            return RecordOutcome::SkippedFuture;
        }

        let current = (report.total_score, report.components.to_scores());
        let slot = self.slot(year, month);
        let mut last_recorded = lock(&slot);

        if *last_recorded == Some(current) && Self::stored_matches(db, year, month, &current) {
            return RecordOutcome::Unchanged;
        }

        match db.upsert_health_snapshot(year, month, current.0, &current.1) {
            Ok(write) => {
                *last_recorded = Some(current);
                debug!(
                    year,
                    month,
                    total = report.total_score,
                    ?write,
                    "Recorded health snapshot"
                );
                RecordOutcome::Written(write)
            }
            Err(e) => {
                *last_recorded = None;
                warn!(year, month, "Failed to record health snapshot: {}", e);
                RecordOutcome::Failed
            }
        }
    }

    /// Whether the stored row still holds `recorded`
    ///
    /// Another writer may have replaced the row since this recorder wrote it.
    fn stored_matches(db: &Database, year: i32, month: u32, recorded: &Recorded) -> bool {
        match db.get_health_snapshot(year, month) {
            Ok(Some(stored)) => {
                stored.total_score == recorded.0
                    && same_scores(&stored.component_scores, &recorded.1)
            }
            Ok(None) => false,
            Err(e) => {
                debug!(year, month, "Could not read stored snapshot: {}", e);
                false
            }
        }
    }

    /// Forget what was recorded, so the next call for any month writes
    pub fn reset(&self) {
        lock(&self.slots).clear();
    }
}
