//! Health score snapshot operations

use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{ComponentScores, HealthScoreSnapshot};

/// Result of upserting a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotWrite {
    /// No row existed for the month; contains the new snapshot ID
    Inserted(i64),
    /// Existing row updated in place; contains its (unchanged) ID
    Updated(i64),
}

impl SnapshotWrite {
    pub fn id(&self) -> i64 {
        match self {
            Self::Inserted(id) | Self::Updated(id) => *id,
        }
    }
}

impl Database {
    /// Insert or update the snapshot for (year, month)
    ///
    /// The existence check and the write run in one `BEGIN IMMEDIATE`
    /// transaction, so a concurrent writer cannot slip a second row in between.
    /// An existing row keeps its ID and `created_at`; only the scores and
    /// `updated_at` change.
    pub fn upsert_health_snapshot(
        &self,
        year: i32,
        month: u32,
        total_score: u8,
        components: &ComponentScores,
    ) -> Result<SnapshotWrite> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        let components_json = serde_json::to_string(components)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM health_score_snapshots WHERE year = ? AND month = ? ORDER BY id LIMIT 1",
                params![year, month],
                |row| row.get(0),
            )
            .optional()?;

        let result = if let Some(id) = existing {
            tx.execute(
                r#"
                UPDATE health_score_snapshots
                SET total_score = ?, component_scores = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
                "#,
                params![total_score, components_json, id],
            )?;
            SnapshotWrite::Updated(id)
        } else {
            tx.execute(
                r#"
                INSERT INTO health_score_snapshots (year, month, total_score, component_scores)
                VALUES (?, ?, ?, ?)
                "#,
                params![year, month, total_score, components_json],
            )?;
            SnapshotWrite::Inserted(tx.last_insert_rowid())
        };

        tx.commit()?;
        Ok(result)
    }

    /// Get the snapshot for (year, month), if one was recorded
    pub fn get_health_snapshot(&self, year: i32, month: u32) -> Result<Option<HealthScoreSnapshot>> {
        let conn = self.conn()?;
        let snapshot = conn
            .query_row(
                r#"
                SELECT id, year, month, total_score, component_scores, created_at, updated_at
                FROM health_score_snapshots
                WHERE year = ? AND month = ?
                ORDER BY id
                LIMIT 1
                "#,
                params![year, month],
                Self::row_to_snapshot,
            )
            .optional()?;
        Ok(snapshot)
    }

    /// All snapshots recorded for a year, ordered by month
    pub fn list_health_snapshots(&self, year: i32) -> Result<Vec<HealthScoreSnapshot>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, year, month, total_score, component_scores, created_at, updated_at
            FROM health_score_snapshots
            WHERE year = ?
            ORDER BY month, id
            "#,
        )?;

        let mut snapshots: Vec<HealthScoreSnapshot> = stmt
            .query_map(params![year], Self::row_to_snapshot)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        snapshots.dedup_by_key(|s| s.month);

        Ok(snapshots)
    }

    fn row_to_snapshot(row: &rusqlite::Row) -> rusqlite::Result<HealthScoreSnapshot> {
        let components_json: String = row.get(4)?;
        let created_at: String = row.get(5)?;
        let updated_at: String = row.get(6)?;

        let component_scores: ComponentScores =
            serde_json::from_str(&components_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(HealthScoreSnapshot {
            id: row.get(0)?,
            year: row.get(1)?,
            month: row.get(2)?,
            total_score: row.get(3)?,
            component_scores,
            created_at: parse_datetime(&created_at),
            updated_at: parse_datetime(&updated_at),
        })
    }
}
