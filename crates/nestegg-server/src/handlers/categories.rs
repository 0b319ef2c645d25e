//! Category handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState, SuccessResponse};
use nestegg_core::models::Category;

/// GET /api/categories - List categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.db.list_categories()?;
    Ok(Json(categories))
}

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub default_budget: Option<f64>,
}

/// POST /api/categories - Create a category (or update its default budget)
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let id = state.db.upsert_category(&body.name, body.default_budget)?;
    let category = state
        .db
        .get_category(id)?
        .ok_or_else(|| AppError::internal("Category vanished after insert"))?;

    info!(id, name = %category.name, "Saved category");
    Ok(Json(category))
}

/// DELETE /api/categories/:id - Delete a category
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_category(id)?;

    info!(id, "Deleted category");
    Ok(Json(SuccessResponse { success: true }))
}
