//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use nestegg_core::health::today;
use nestegg_core::models::{NewTransaction, Transaction, TransactionType};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<Transaction>,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let transactions = state.db.list_transactions(limit, offset)?;

    Ok(Json(TransactionResponse {
        transactions,
        limit,
        offset,
    }))
}

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    /// Marks the transaction as a repayment of this debt
    pub debt_id: Option<i64>,
    pub description: Option<String>,
}

/// Reject references to categories that don't exist
pub(crate) fn ensure_category(state: &AppState, category_id: Option<i64>) -> Result<(), AppError> {
    match category_id {
        Some(id) if state.db.get_category(id)?.is_none() => {
            Err(AppError::not_found("Category not found"))
        }
        _ => Ok(()),
    }
}

/// POST /api/transactions - Record a transaction
///
/// Transactions carrying a `debt_id` are booked as debt repayments, so the
/// debt's paid amount moves with them.
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let date = body.date.unwrap_or_else(today);
    ensure_category(&state, body.category_id)?;

    let id = match body.debt_id {
        Some(debt_id) => {
            if body.transaction_type != TransactionType::Expense {
                return Err(AppError::bad_request(
                    "Only expense transactions can repay a debt",
                ));
            }
            state.db.record_debt_payment(
                debt_id,
                body.amount,
                date,
                body.category_id,
                body.description.as_deref(),
            )?
        }
        None => {
            let mut tx = NewTransaction::new(body.transaction_type, body.amount, date);
            tx.category_id = body.category_id;
            tx.description = body.description;
            state.db.insert_transaction(&tx)?
        }
    };

    let transaction = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::internal("Transaction vanished after insert"))?;

    info!(
        id,
        kind = %transaction.transaction_type,
        date = %transaction.date,
        "Recorded transaction"
    );
    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_transaction(id)?;

    info!(id, "Deleted transaction");
    Ok(Json(SuccessResponse { success: true }))
}
