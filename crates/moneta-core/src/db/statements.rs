//! Bank statement persistence
//!
//! A statement row and its transaction batch are written in one SQLite
//! transaction. Any failed insert rolls the whole batch back, so the store
//! never holds a partially imported statement.

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{BankStatement, CategorizedDraft, Transaction};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str = "SELECT id, account_id, filename, content_hash, mime_type, \
     file_size_bytes, transaction_count, created_at FROM bank_statements";

pub(super) fn row_to_statement(row: &Row<'_>) -> rusqlite::Result<BankStatement> {
    let created_at_str: String = row.get(7)?;
    Ok(BankStatement {
        id: row.get(0)?,
        account_id: row.get(1)?,
        filename: row.get(2)?,
        content_hash: row.get(3)?,
        mime_type: row.get(4)?,
        file_size_bytes: row.get(5)?,
        transaction_count: row.get(6)?,
        created_at: parse_datetime(&created_at_str),
    })
}

/// Metadata for a statement about to be persisted
#[derive(Debug, Clone)]
pub struct NewStatement {
    pub account_id: i64,
    pub filename: Option<String>,
    pub content_hash: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
}

impl Database {
    /// Atomically insert a statement and all of its transactions
    ///
    /// Returns the statement record and the persisted transactions in batch
    /// order. On any failure nothing is written.
    pub fn insert_statement_with_transactions(
        &self,
        statement: &NewStatement,
        drafts: &[CategorizedDraft],
    ) -> Result<(BankStatement, Vec<Transaction>)> {
        let conn = self.conn()?;

        conn.execute("BEGIN IMMEDIATE TRANSACTION", [])?;

        let result = (|| {
            conn.execute(
                "INSERT INTO bank_statements (account_id, filename, content_hash, mime_type, file_size_bytes, transaction_count) \
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    statement.account_id,
                    statement.filename,
                    statement.content_hash,
                    statement.mime_type,
                    statement.file_size_bytes,
                    drafts.len() as i64,
                ],
            )?;
            let statement_id = conn.last_insert_rowid();

            let mut transaction_ids = Vec::with_capacity(drafts.len());
            {
                let mut stmt = conn.prepare(
                    "INSERT INTO transactions (account_id, statement_id, started_date, completed_date, \
                     description, amount, currency, start_balance, end_balance, category) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )?;
                for categorized in drafts {
                    let draft = &categorized.draft;
                    stmt.execute(params![
                        statement.account_id,
                        statement_id,
                        draft.started_date.format(DATETIME_FORMAT).to_string(),
                        draft.completed_date.format(DATETIME_FORMAT).to_string(),
                        draft.description,
                        draft.amount,
                        draft.currency,
                        draft.start_balance,
                        draft.end_balance,
                        categorized.category.as_str(),
                    ])?;
                    transaction_ids.push(conn.last_insert_rowid());
                }
            }

            // Read the rows back inside the same transaction so the caller
            // gets exactly what was committed
            let statement_record = conn.query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![statement_id],
                row_to_statement,
            )?;

            let mut stmt = conn.prepare(
                "SELECT id, account_id, statement_id, started_date, completed_date, \
                 description, amount, currency, start_balance, end_balance, category, created_at \
                 FROM transactions WHERE statement_id = ? ORDER BY id",
            )?;
            let transactions = stmt
                .query_map(params![statement_id], super::transactions::row_to_transaction)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok((statement_record, transactions))
        })();

        match result {
            Ok(inserted) => {
                conn.execute("COMMIT", [])?;
                Ok(inserted)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// List statements for an account, newest first
    pub fn list_statements(&self, account_id: i64) -> Result<Vec<BankStatement>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE account_id = ? ORDER BY id DESC",
            SELECT_COLUMNS
        ))?;

        let statements = stmt
            .query_map(params![account_id], row_to_statement)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(statements)
    }

    /// List all statements, newest first
    pub fn list_all_statements(&self) -> Result<Vec<BankStatement>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id DESC", SELECT_COLUMNS))?;

        let statements = stmt
            .query_map([], row_to_statement)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(statements)
    }

    /// Get a statement by ID
    pub fn get_statement(&self, id: i64) -> Result<Option<BankStatement>> {
        let conn = self.conn()?;
        let statement = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                row_to_statement,
            )
            .optional()?;
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionDraft};
    use chrono::NaiveDate;

    fn draft(description: &str, amount: f64, currency: &str) -> CategorizedDraft {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        CategorizedDraft {
            draft: TransactionDraft {
                started_date: date,
                completed_date: date,
                description: description.to_string(),
                amount,
                currency: currency.to_string(),
                start_balance: None,
                end_balance: None,
            },
            category: Category::Other,
        }
    }

    fn new_statement(account_id: i64) -> NewStatement {
        NewStatement {
            account_id,
            filename: Some("january.csv".to_string()),
            content_hash: "deadbeef".to_string(),
            mime_type: "text/csv".to_string(),
            file_size_bytes: 512,
        }
    }

    #[test]
    fn test_insert_statement_with_transactions() {
        let db = Database::in_memory().unwrap();
        let account_id = db.create_account(None, "Main", "revolut", None).unwrap();

        let (statement, transactions) = db
            .insert_statement_with_transactions(
                &new_statement(account_id),
                &[draft("Coffee", -3.5, "EUR"), draft("Salary", 2500.0, "EUR")],
            )
            .unwrap();

        assert_eq!(statement.transaction_count, 2);
        assert_eq!(statement.content_hash, "deadbeef");
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].description, "Coffee");
        assert_eq!(transactions[0].statement_id, statement.id);
        assert_eq!(transactions[1].category, Category::Other);
    }

    #[test]
    fn test_failed_insert_rolls_back_everything() {
        let db = Database::in_memory().unwrap();
        let account_id = db.create_account(None, "Main", "revolut", None).unwrap();

        // Third draft violates the currency CHECK constraint
        let drafts = vec![
            draft("One", -1.0, "EUR"),
            draft("Two", -2.0, "EUR"),
            draft("Three", -3.0, "EU"),
        ];
        let result = db.insert_statement_with_transactions(&new_statement(account_id), &drafts);
        assert!(result.is_err());

        assert_eq!(db.count_transactions(account_id).unwrap(), 0);
        assert!(db.list_statements(account_id).unwrap().is_empty());
    }

    #[test]
    fn test_list_all_statements_and_per_statement_transactions() {
        let db = Database::in_memory().unwrap();
        let first = db.create_account(None, "Main", "revolut", None).unwrap();
        let second = db.create_account(None, "Side", "wise", None).unwrap();

        let (statement, _) = db
            .insert_statement_with_transactions(
                &new_statement(first),
                &[draft("Coffee", -3.5, "EUR"), draft("Salary", 2500.0, "EUR")],
            )
            .unwrap();
        db.insert_statement_with_transactions(&new_statement(second), &[draft("Rent", -900.0, "EUR")])
            .unwrap();

        assert_eq!(db.list_all_statements().unwrap().len(), 2);
        assert_eq!(db.list_statements(first).unwrap().len(), 1);

        let transactions = db.list_transactions_for_statement(statement.id).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].description, "Coffee");
        assert!(db.list_transactions_for_statement(999).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_upload_is_not_deduplicated() {
        let db = Database::in_memory().unwrap();
        let account_id = db.create_account(None, "Main", "revolut", None).unwrap();

        let drafts = [draft("Coffee", -3.5, "EUR")];
        db.insert_statement_with_transactions(&new_statement(account_id), &drafts)
            .unwrap();
        db.insert_statement_with_transactions(&new_statement(account_id), &drafts)
            .unwrap();

        let statements = db.list_statements(account_id).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].content_hash, statements[1].content_hash);
        assert_eq!(db.count_transactions(account_id).unwrap(), 2);
    }
}
