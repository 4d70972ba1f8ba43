//! Error types for Moneta

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed statement file: {0}")]
    MalformedFile(String),

    #[error("Unsupported bank: {0}")]
    UnsupportedBank(String),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Invalid transaction at row {row}: {field} {constraint}")]
    Validation {
        /// Zero-based index of the offending record in the uploaded file
        row: usize,
        field: &'static str,
        constraint: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
