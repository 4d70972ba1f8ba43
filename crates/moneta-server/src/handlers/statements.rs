//! Statement import handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState};
use moneta_core::models::{BankStatement, Transaction};
use moneta_core::{StatementIngestor, StatementUpload, TransactionCategorizer};

#[derive(Serialize)]
pub struct ImportResponse {
    pub statement: BankStatement,
    pub transactions: Vec<Transaction>,
}

/// POST /api/statements/import - Import a bank statement
///
/// Multipart form with two parts:
/// - `account_id`: the target account
/// - `file`: the statement bytes; the part's content type selects the
///   parser, falling back to the filename extension when the browser sends
///   a generic type
pub async fn import_statement(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut account_id: Option<i64> = None;
    let mut file: Option<(Vec<u8>, String, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("Invalid multipart body"))?
    {
        match field.name() {
            Some("account_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("Invalid account_id field"))?;
                account_id = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| AppError::bad_request("account_id must be an integer"))?,
                );
            }
            Some("file") => {
                let filename = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read uploaded file"))?;
                let mime_type = resolve_mime_type(content_type.as_deref(), filename.as_deref());
                file = Some((bytes.to_vec(), mime_type, filename));
            }
            _ => {}
        }
    }

    let account_id =
        account_id.ok_or_else(|| AppError::bad_request("Missing account_id field"))?;
    let (bytes, mime_type, filename) =
        file.ok_or_else(|| AppError::bad_request("Missing file field"))?;
    if bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }

    info!(
        account_id,
        mime_type = %mime_type,
        size = bytes.len(),
        "Importing statement"
    );

    let categorizer = TransactionCategorizer::new(state.ai.clone());
    let ingestor = StatementIngestor::new(&state.db, categorizer);
    let (statement, transactions) = ingestor
        .ingest(StatementUpload {
            account_id,
            bytes,
            mime_type,
            filename,
        })
        .await?;

    Ok(Json(ImportResponse {
        statement,
        transactions,
    }))
}

/// Query parameters for listing statements
#[derive(Debug, Deserialize)]
pub struct ListStatementsParams {
    pub account_id: Option<i64>,
}

/// GET /api/statements - List statements, newest first
pub async fn list_statements(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListStatementsParams>,
) -> Result<Json<Vec<BankStatement>>, AppError> {
    let statements = match params.account_id {
        Some(account_id) => state.db.list_statements(account_id)?,
        None => state.db.list_all_statements()?,
    };
    Ok(Json(statements))
}

/// GET /api/statements/:id - Get a statement record
pub async fn get_statement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<BankStatement>, AppError> {
    let statement = state
        .db
        .get_statement(id)?
        .ok_or_else(|| AppError::not_found(&format!("Statement {} not found", id)))?;
    Ok(Json(statement))
}

/// GET /api/statements/:id/transactions - Transactions persisted by a statement
pub async fn list_statement_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if state.db.get_statement(id)?.is_none() {
        return Err(AppError::not_found(&format!("Statement {} not found", id)));
    }
    let transactions = state.db.list_transactions_for_statement(id)?;
    Ok(Json(transactions))
}

/// Pick the MIME type used for parser selection
///
/// Browsers often send `application/octet-stream` for spreadsheets, so a
/// generic or missing content type falls back to the filename extension.
fn resolve_mime_type(content_type: Option<&str>, filename: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if ct != "application/octet-stream" {
            return ct.to_string();
        }
    }
    match filename
        .and_then(|f| f.rsplit('.').next())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv".to_string(),
        Some("xls") => "application/vnd.ms-excel".to_string(),
        Some("xlsx") => {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string()
        }
        _ => content_type.unwrap_or("application/octet-stream").to_string(),
    }
}
