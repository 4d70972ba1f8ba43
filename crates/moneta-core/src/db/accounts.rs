//! Account operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Account;

impl Database {
    /// Create an account
    ///
    /// The bank designator is stored as-is; it is resolved against the
    /// supported-bank set at statement import time.
    pub fn create_account(
        &self,
        user_id: Option<i64>,
        name: &str,
        bank: &str,
        currency: Option<&str>,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO accounts (user_id, name, bank, currency) VALUES (?, ?, ?, ?)",
            params![user_id, name, bank.to_lowercase(), currency],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List all accounts
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, bank, currency, created_at FROM accounts ORDER BY name",
        )?;

        let accounts = stmt
            .query_map([], |row| {
                let created_at_str: String = row.get(5)?;
                Ok(Account {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    bank: row.get(3)?,
                    currency: row.get(4)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// List accounts belonging to a user
    pub fn list_accounts_for_user(&self, user_id: i64) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, bank, currency, created_at FROM accounts WHERE user_id = ? ORDER BY name",
        )?;

        let accounts = stmt
            .query_map(params![user_id], |row| {
                let created_at_str: String = row.get(5)?;
                Ok(Account {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    bank: row.get(3)?,
                    currency: row.get(4)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Get an account by ID
    pub fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let account = conn
            .query_row(
                "SELECT id, user_id, name, bank, currency, created_at FROM accounts WHERE id = ?",
                params![id],
                |row| {
                    let created_at_str: String = row.get(5)?;
                    Ok(Account {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                        bank: row.get(3)?,
                        currency: row.get(4)?,
                        created_at: parse_datetime(&created_at_str),
                    })
                },
            )
            .optional()?;

        Ok(account)
    }

    /// Update an account's name and bank
    pub fn update_account(&self, id: i64, name: &str, bank: &str) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE accounts SET name = ?, bank = ? WHERE id = ?",
            params![name, bank.to_lowercase(), id],
        )?;
        if updated == 0 {
            return Err(Error::AccountNotFound(id));
        }
        Ok(())
    }

    /// Delete an account with its statements and transactions
    pub fn delete_account(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        // Use explicit transaction for atomicity
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute("DELETE FROM transactions WHERE account_id = ?", params![id])?;
            conn.execute(
                "DELETE FROM bank_statements WHERE account_id = ?",
                params![id],
            )?;
            let deleted = conn.execute("DELETE FROM accounts WHERE id = ?", params![id])?;
            if deleted == 0 {
                return Err(Error::AccountNotFound(id));
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_account() {
        let db = Database::in_memory().unwrap();
        let id = db.create_account(None, "Main", "Revolut", Some("EUR")).unwrap();
        let account = db.get_account(id).unwrap().unwrap();
        assert_eq!(account.name, "Main");
        // designator is normalized to lowercase on write
        assert_eq!(account.bank, "revolut");
        assert_eq!(account.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_unknown_bank_designator_is_stored() {
        let db = Database::in_memory().unwrap();
        let id = db.create_account(None, "Old", "monzo", None).unwrap();
        let account = db.get_account(id).unwrap().unwrap();
        assert_eq!(account.bank, "monzo");
    }

    #[test]
    fn test_update_missing_account() {
        let db = Database::in_memory().unwrap();
        let err = db.update_account(42, "x", "wise").unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(42)));
    }

    #[test]
    fn test_delete_missing_account_rolls_back() {
        let db = Database::in_memory().unwrap();
        let err = db.delete_account(42).unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(42)));
    }
}
