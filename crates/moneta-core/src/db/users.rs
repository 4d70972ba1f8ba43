//! User operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

impl Database {
    /// Create a user
    ///
    /// Emails are unique; a second user with the same email is a conflict.
    pub fn create_user(&self, email: &str, name: &str) -> Result<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (email, name) VALUES (?, ?)",
            params![email, name],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::Conflict(format!("user with email {} already exists", email))
            }
            other => Error::Database(other),
        })?;
        let id = conn.last_insert_rowid();
        self.get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, email, name, created_at FROM users ORDER BY email")?;

        let users = stmt
            .query_map([], |row| {
                let created_at_str: String = row.get(3)?;
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, name, created_at FROM users WHERE id = ?",
                params![id],
                |row| {
                    let created_at_str: String = row.get(3)?;
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                        created_at: parse_datetime(&created_at_str),
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    /// Update a user's name
    pub fn update_user(&self, id: i64, name: &str) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute("UPDATE users SET name = ? WHERE id = ?", params![name, id])?;
        if updated == 0 {
            return Err(Error::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    /// Delete a user and cascade to their accounts, statements, and
    /// transactions in one database transaction
    pub fn delete_user(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute(
                "DELETE FROM transactions WHERE account_id IN \
                 (SELECT id FROM accounts WHERE user_id = ?)",
                params![id],
            )?;
            conn.execute(
                "DELETE FROM bank_statements WHERE account_id IN \
                 (SELECT id FROM accounts WHERE user_id = ?)",
                params![id],
            )?;
            conn.execute("DELETE FROM accounts WHERE user_id = ?", params![id])?;
            let deleted = conn.execute("DELETE FROM users WHERE id = ?", params![id])?;
            if deleted == 0 {
                return Err(Error::NotFound(format!("user {}", id)));
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
    fn test_create_and_get_user() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("ada@example.com", "Ada").unwrap();
        assert_eq!(user.email, "ada@example.com");

        let fetched = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Ada");
        assert!(db.get_user(9999).unwrap().is_none());
    }

    #[test]
    fn test_get_user_propagates_query_failures() {
        let db = Database::in_memory().unwrap();

        // A missing row is None, a broken schema is an error
        assert!(db.get_user(1).unwrap().is_none());
        db.conn().unwrap().execute("DROP TABLE users", []).unwrap();
        assert!(db.get_user(1).is_err());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = Database::in_memory().unwrap();
        db.create_user("ada@example.com", "Ada").unwrap();
        let err = db.create_user("ada@example.com", "Imposter").unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_delete_user_cascades_to_account_data() {
        use crate::db::NewStatement;
        use crate::models::{Category, CategorizedDraft, TransactionDraft};
        use chrono::NaiveDate;

        let db = Database::in_memory().unwrap();
        let user = db.create_user("ada@example.com", "Ada").unwrap();
        let account_id = db
            .create_account(Some(user.id), "Main", "revolut", Some("EUR"))
            .unwrap();
        let other_id = db.create_account(None, "Orphan", "wise", None).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let drafts = [CategorizedDraft {
            draft: TransactionDraft {
                started_date: date,
                completed_date: date,
                description: "Coffee".to_string(),
                amount: -3.5,
                currency: "EUR".to_string(),
                start_balance: None,
                end_balance: None,
            },
            category: Category::Other,
        }];
        let statement = NewStatement {
            account_id,
            filename: None,
            content_hash: "deadbeef".to_string(),
            mime_type: "text/csv".to_string(),
            file_size_bytes: 64,
        };
        db.insert_statement_with_transactions(&statement, &drafts)
            .unwrap();

        db.delete_user(user.id).unwrap();
        assert!(db.get_user(user.id).unwrap().is_none());
        assert!(db.get_account(account_id).unwrap().is_none());
        assert!(db.list_statements(account_id).unwrap().is_empty());
        assert_eq!(db.count_transactions(account_id).unwrap(), 0);

        // Accounts of other owners are untouched
        assert!(db.get_account(other_id).unwrap().is_some());
    }
}
