//! Monthly budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::health::MonthQuery;
use crate::{AppError, AppState, SuccessResponse};
use nestegg_core::models::{EffectiveBudget, MonthlyBudget};

#[derive(Serialize)]
pub struct BudgetsResponse {
    pub year: i32,
    pub month: u32,
    /// Explicit rows for the month
    pub budgets: Vec<MonthlyBudget>,
    /// Budgets in force, including category defaults
    pub effective: Vec<EffectiveBudget>,
}

/// GET /api/budgets - Budgets for a month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<BudgetsResponse>, AppError> {
    let (year, month) = params.resolve()?;

    let budgets = state.db.list_monthly_budgets(year, month)?;
    let effective = state.db.effective_budgets(year, month)?;

    Ok(Json(BudgetsResponse {
        year,
        month,
        budgets,
        effective,
    }))
}

/// Request body for setting a monthly budget
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub planned_amount: f64,
}

/// PUT /api/budgets - Set a category's planned amount for a month
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetBudgetRequest>,
) -> Result<Json<MonthlyBudget>, AppError> {
    if state.db.get_category(body.category_id)?.is_none() {
        return Err(AppError::not_found("Category not found"));
    }

    let id = state.db.set_monthly_budget(
        body.category_id,
        body.year,
        body.month,
        body.planned_amount,
    )?;

    info!(
        id,
        category_id = body.category_id,
        year = body.year,
        month = body.month,
        "Set monthly budget"
    );

    Ok(Json(MonthlyBudget {
        id,
        category_id: body.category_id,
        year: body.year,
        month: body.month,
        planned_amount: body.planned_amount,
    }))
}

/// DELETE /api/budgets/:id - Delete a monthly budget row
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_monthly_budget(id)?;

    info!(id, "Deleted monthly budget");
    Ok(Json(SuccessResponse { success: true }))
}
