//! Statement ingestion orchestration
//!
//! One entry point ties the pipeline together: resolve the account, select a
//! parser by MIME type, map records with the account's bank mapper,
//! categorize the batch, and persist statement plus transactions atomically.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::categorizer::TransactionCategorizer;
use crate::db::{Database, NewStatement};
use crate::error::{Error, Result};
use crate::mapper;
use crate::models::{Bank, BankStatement, Transaction};
use crate::parser::StatementParser;

/// An uploaded statement file with its routing metadata
#[derive(Debug, Clone)]
pub struct StatementUpload {
    pub account_id: i64,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: Option<String>,
}

pub struct StatementIngestor<'a> {
    db: &'a Database,
    categorizer: TransactionCategorizer,
}

impl<'a> StatementIngestor<'a> {
    pub fn new(db: &'a Database, categorizer: TransactionCategorizer) -> Self {
        Self { db, categorizer }
    }

    /// Run the full import pipeline for one uploaded statement
    ///
    /// Fails before any side effect: parse, mapping, and validation errors
    /// surface with nothing persisted. Categorization cannot fail; a broken
    /// or absent model leaves every transaction as `other`.
    pub async fn ingest(&self, upload: StatementUpload) -> Result<(BankStatement, Vec<Transaction>)> {
        let account = self
            .db
            .get_account(upload.account_id)?
            .ok_or(Error::AccountNotFound(upload.account_id))?;

        let parser = StatementParser::for_mime(&upload.mime_type)?;
        let records = parser.parse(&upload.bytes)?;

        // Resolve the mapper only once the file itself is readable, so
        // format errors take precedence over an unmapped designator
        let bank: Bank = account
            .bank
            .parse()
            .map_err(|_| Error::UnsupportedBank(account.bank.clone()))?;
        let drafts = mapper::map_records(bank, &records)?;

        let categorized = self.categorizer.categorize(drafts).await;

        let statement = NewStatement {
            account_id: account.id,
            filename: upload.filename,
            content_hash: hex::encode(Sha256::digest(&upload.bytes)),
            mime_type: upload.mime_type,
            file_size_bytes: upload.bytes.len() as i64,
        };
        let (statement, transactions) =
            self.db.insert_statement_with_transactions(&statement, &categorized)?;

        info!(
            account_id = account.id,
            statement_id = statement.id,
            bank = bank.as_str(),
            count = transactions.len(),
            "Statement imported"
        );

        Ok((statement, transactions))
    }
}
