//! Account management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use moneta_core::currencies;
use moneta_core::models::{Account, BankStatement};

/// Request body for creating an account
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub bank: String,
    pub user_id: Option<i64>,
    pub currency: Option<String>,
}

/// Request body for updating an account
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
    pub bank: String,
}

/// GET /api/accounts - List all accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.db.list_accounts()?))
}

/// POST /api/accounts - Create a new account
///
/// The bank designator is accepted as-is. Supported-bank resolution happens
/// when a statement for the account is imported, so accounts can be created
/// ahead of mapper support.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Account name must not be empty"));
    }
    if req.bank.trim().is_empty() {
        return Err(AppError::bad_request("Bank designator must not be empty"));
    }
    if let Some(ref currency) = req.currency {
        if !currencies::is_known(currency) {
            return Err(AppError::bad_request(&format!(
                "Unknown currency: {}",
                currency
            )));
        }
    }
    if let Some(user_id) = req.user_id {
        state
            .db
            .get_user(user_id)?
            .ok_or_else(|| AppError::bad_request(&format!("User {} does not exist", user_id)))?;
    }

    let account_id = state.db.create_account(
        req.user_id,
        req.name.trim(),
        req.bank.trim(),
        req.currency.as_deref(),
    )?;
    let account = state
        .db
        .get_account(account_id)?
        .ok_or_else(|| AppError::internal("Account not found after creation"))?;

    Ok(Json(account))
}

/// GET /api/accounts/:id - Get a single account
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .db
        .get_account(id)?
        .ok_or_else(|| AppError::not_found(&format!("Account {} not found", id)))?;
    Ok(Json(account))
}

/// PUT /api/accounts/:id - Update an account's name and bank
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Account name must not be empty"));
    }

    state.db.update_account(id, req.name.trim(), req.bank.trim())?;
    let account = state
        .db
        .get_account(id)?
        .ok_or_else(|| AppError::internal("Account not found after update"))?;
    Ok(Json(account))
}

/// DELETE /api/accounts/:id - Delete an account with its statements and
/// transactions
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_account(id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/accounts/:id/statements - List an account's imported statements
pub async fn list_account_statements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<BankStatement>>, AppError> {
    state
        .db
        .get_account(id)?
        .ok_or_else(|| AppError::not_found(&format!("Account {} not found", id)))?;
    Ok(Json(state.db.list_statements(id)?))
}
