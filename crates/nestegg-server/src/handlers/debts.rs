//! Debt handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::transactions::ensure_category;
use crate::{AppError, AppState, SuccessResponse};
use nestegg_core::health::today;
use nestegg_core::models::Debt;

/// GET /api/debts - List debts
pub async fn list_debts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Debt>>, AppError> {
    let debts = state.db.list_debts()?;
    Ok(Json(debts))
}

/// Request body for creating a debt
#[derive(Debug, Deserialize)]
pub struct CreateDebtRequest {
    pub name: String,
    pub original_amount: f64,
}

/// POST /api/debts - Start tracking a debt
pub async fn create_debt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateDebtRequest>,
) -> Result<Json<Debt>, AppError> {
    let id = state.db.create_debt(&body.name, body.original_amount)?;
    let debt = state
        .db
        .get_debt(id)?
        .ok_or_else(|| AppError::internal("Debt vanished after insert"))?;

    info!(id, name = %debt.name, "Created debt");
    Ok(Json(debt))
}

/// Request body for a repayment
#[derive(Debug, Deserialize)]
pub struct DebtPaymentRequest {
    pub amount: f64,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct DebtPaymentResponse {
    pub transaction_id: i64,
    pub debt: Debt,
}

/// POST /api/debts/:id/payments - Record a repayment
pub async fn create_debt_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<DebtPaymentRequest>,
) -> Result<Json<DebtPaymentResponse>, AppError> {
    ensure_category(&state, body.category_id)?;

    let transaction_id = state.db.record_debt_payment(
        id,
        body.amount,
        body.date.unwrap_or_else(today),
        body.category_id,
        body.description.as_deref(),
    )?;

    let debt = state
        .db
        .get_debt(id)?
        .ok_or_else(|| AppError::not_found("Debt not found"))?;

    info!(
        debt_id = id,
        transaction_id,
        amount = body.amount,
        "Recorded debt payment"
    );
    Ok(Json(DebtPaymentResponse {
        transaction_id,
        debt,
    }))
}

/// DELETE /api/debts/:id - Stop tracking a debt (repayments stay as expenses)
pub async fn delete_debt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_debt(id)?;

    info!(id, "Deleted debt");
    Ok(Json(SuccessResponse { success: true }))
}
