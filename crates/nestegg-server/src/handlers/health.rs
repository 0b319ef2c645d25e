//! Liveness and financial health score handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AppError, AppState};
use nestegg_core::health::{today, HealthScoreEngine, HealthScoreReport, TrendPoint};

/// GET /api/health - Liveness check (no auth)
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Month selector, defaulting to the current month
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    pub fn resolve(&self) -> Result<(i32, u32), AppError> {
        let now = today();
        let year = self.year.unwrap_or(now.year());
        let month = self.month.unwrap_or(now.month());
        if !(1..=12).contains(&month) {
            return Err(AppError::bad_request("month must be between 1 and 12"));
        }
        Ok((year, month))
    }
}

/// Persist a served score off the async runtime
///
/// The response does not wait for this; failures are logged by the recorder.
fn schedule_snapshot(state: Arc<AppState>, report: HealthScoreReport) {
    tokio::task::spawn_blocking(move || {
        let outcome = state.recorder.record(&state.db, &report, today());
        debug!(
            year = report.year,
            month = report.month,
            ?outcome,
            "Snapshot follow-up finished"
        );
    });
}

/// GET /api/health-score - Health score for a month
pub async fn get_health_score(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<HealthScoreReport>, AppError> {
    let (year, month) = params.resolve()?;

    let report = HealthScoreEngine::new(&state.db, state.settings).score_month(year, month)?;

    schedule_snapshot(state.clone(), report.clone());

    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub year: Option<i32>,
}

#[derive(Serialize)]
pub struct TrendResponse {
    pub year: i32,
    pub trend: Vec<TrendPoint>,
}

/// GET /api/health-score/trend - Twelve-month trend with projection
pub async fn get_health_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, AppError> {
    let year = params.year.unwrap_or_else(|| today().year());

    let trend = HealthScoreEngine::new(&state.db, state.settings).trend(year)?;

    Ok(Json(TrendResponse { year, trend }))
}
