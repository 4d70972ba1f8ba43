//! Core library for Moneta, a personal finance backend
//!
//! Moneta tracks users, their bank accounts, and the transactions imported
//! from bank statement exports. The ingestion pipeline parses uploaded
//! CSV/XLS/XLSX files, maps them with a per-bank mapper, categorizes the
//! batch with a local AI model, and persists everything atomically to an
//! optionally SQLCipher-encrypted SQLite database.
//!
//! # Modules
//!
//! - [`models`] - Domain types (users, accounts, transactions, categories)
//! - [`parser`] - MIME-selected statement file parsing
//! - [`mapper`] - Per-bank record mapping and validation
//! - [`ai`] - Local AI backend abstraction (Ollama, mock)
//! - [`categorizer`] - Batch categorization with total fallback
//! - [`ingest`] - The import pipeline orchestrator
//! - [`db`] - Pooled SQLite access and migrations
//! - [`currencies`] - Supported currency reference data

pub mod ai;
pub mod categorizer;
pub mod currencies;
pub mod db;
pub mod error;
pub mod ingest;
pub mod mapper;
pub mod models;
pub mod parser;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use categorizer::TransactionCategorizer;
pub use db::Database;
pub use error::{Error, Result};
pub use ingest::{StatementIngestor, StatementUpload};
