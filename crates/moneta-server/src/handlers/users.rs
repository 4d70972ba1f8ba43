//! User management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use moneta_core::models::{Account, User};

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

/// Request body for updating a user
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
}

/// GET /api/users - List all users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.db.list_users()?))
}

/// POST /api/users - Create a new user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("A valid email address is required"));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name must not be empty"));
    }

    let user = state.db.create_user(email, req.name.trim())?;
    Ok(Json(user))
}

/// GET /api/users/:id - Get a single user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = state
        .db
        .get_user(id)?
        .ok_or_else(|| AppError::not_found(&format!("User {} not found", id)))?;
    Ok(Json(user))
}

/// PUT /api/users/:id - Update a user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name must not be empty"));
    }

    state.db.update_user(id, req.name.trim())?;
    let user = state
        .db
        .get_user(id)?
        .ok_or_else(|| AppError::internal("User not found after update"))?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - Delete a user and all of their account data
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_user(id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/users/:id/accounts - List a user's accounts
pub async fn list_user_accounts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Account>>, AppError> {
    state
        .db
        .get_user(id)?
        .ok_or_else(|| AppError::not_found(&format!("User {} not found", id)))?;
    Ok(Json(state.db.list_accounts_for_user(id)?))
}
