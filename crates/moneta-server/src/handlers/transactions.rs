//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use moneta_core::db::TransactionQuery;
use moneta_core::models::{Category, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsParams {
    pub account_id: Option<i64>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for re-categorizing a transaction
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category: String,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTransactionsParams>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let category = params
        .category
        .as_deref()
        .map(|label| {
            Category::from_label(label)
                .ok_or_else(|| AppError::bad_request(&format!("Unknown category: {}", label)))
        })
        .transpose()?;

    let limit = params.limit.unwrap_or(100);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(AppError::bad_request(&format!(
            "limit must be between 1 and {}",
            MAX_PAGE_LIMIT
        )));
    }
    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::bad_request("offset must not be negative"));
    }

    let transactions = state.db.list_transactions(&TransactionQuery {
        account_id: params.account_id,
        category,
        limit: Some(limit),
        offset: Some(offset),
    })?;

    Ok(Json(transactions))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;
    Ok(Json(transaction))
}

/// PUT /api/transactions/:id/category - Manually re-categorize
pub async fn update_transaction_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<Transaction>, AppError> {
    let category = Category::from_label(&req.category)
        .ok_or_else(|| AppError::bad_request(&format!("Unknown category: {}", req.category)))?;

    state.db.update_transaction_category(id, category)?;
    let transaction = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::internal("Transaction not found after update"))?;
    Ok(Json(transaction))
}
