//! Transaction queries and category updates

use rusqlite::{params_from_iter, OptionalExtension, Row};

use super::{parse_datetime, parse_naive_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, Transaction};

/// Filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub account_id: Option<i64>,
    pub category: Option<Category>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const SELECT_COLUMNS: &str = "SELECT id, account_id, statement_id, started_date, completed_date, \
     description, amount, currency, start_balance, end_balance, category, created_at \
     FROM transactions";

pub(super) fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let started_str: String = row.get(3)?;
    let completed_str: String = row.get(4)?;
    let category_str: String = row.get(10)?;
    let created_at_str: String = row.get(11)?;

    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        statement_id: row.get(2)?,
        started_date: parse_naive_datetime(&started_str),
        completed_date: parse_naive_datetime(&completed_str),
        description: row.get(5)?,
        amount: row.get(6)?,
        currency: row.get(7)?,
        start_balance: row.get(8)?,
        end_balance: row.get(9)?,
        category: Category::from_label(&category_str).unwrap_or(Category::Other),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// List transactions, newest first
    pub fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = SELECT_COLUMNS.to_string();
        let mut clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(account_id) = query.account_id {
            clauses.push("account_id = ?");
            params.push(Box::new(account_id));
        }
        if let Some(category) = query.category {
            clauses.push("category = ?");
            params.push(Box::new(category.as_str()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY completed_date DESC, id DESC");

        sql.push_str(" LIMIT ?");
        params.push(Box::new(query.limit.unwrap_or(100)));
        sql.push_str(" OFFSET ?");
        params.push(Box::new(query.offset.unwrap_or(0)));

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_from_iter(params.iter().map(|p| p.as_ref())), row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                rusqlite::params![id],
                row_to_transaction,
            )
            .optional()?;
        Ok(transaction)
    }

    /// List the transactions persisted by one statement, in batch order
    pub fn list_transactions_for_statement(&self, statement_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("{} WHERE statement_id = ? ORDER BY id", SELECT_COLUMNS))?;
        let transactions = stmt
            .query_map(rusqlite::params![statement_id], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    /// Manually re-categorize a transaction
    pub fn update_transaction_category(&self, id: i64, category: Category) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE transactions SET category = ? WHERE id = ?",
            rusqlite::params![category.as_str(), id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    /// Count transactions on an account
    pub fn count_transactions(&self, account_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE account_id = ?",
            rusqlite::params![account_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
