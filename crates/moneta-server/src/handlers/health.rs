//! Health and status handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use moneta_core::ai::AIBackend;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub encrypted: bool,
    pub ai_backend: Option<String>,
}

/// GET /api/health - Service health and configuration summary
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let encrypted = state.db.is_encrypted()?;
    Ok(Json(HealthResponse {
        status: "ok",
        encrypted,
        ai_backend: state.ai.as_ref().map(|client| client.host().to_string()),
    }))
}
