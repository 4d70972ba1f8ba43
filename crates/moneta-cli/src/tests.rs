//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use moneta_core::db::Database;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

const REVOLUT_CSV: &str = "\
Type,Product,Started Date,Completed Date,Description,Amount,Fee,Currency,State,Balance
CARD_PAYMENT,Current,2024-03-01 09:15:00,2024-03-01 09:15:22,Corner Cafe,-4.50,0.00,EUR,COMPLETED,995.50
TOPUP,Current,2024-03-02 08:00:00,2024-03-02 08:00:05,Salary March,2500.00,0.00,EUR,COMPLETED,3495.50
";

// ========== Utility Tests ==========

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("short", 10), "short");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("a very long description", 10), "a very ...");
}

#[test]
fn test_truncate_multibyte_description() {
    let s = "é".repeat(30);
    assert_eq!(truncate(&s, 20), format!("{}...", "é".repeat(17)));
    assert_eq!(truncate("Café Crème", 40), "Café Crème");
}

// ========== Users Command Tests ==========

#[test]
fn test_cmd_users_add_and_list() {
    let db = setup_test_db();
    commands::cmd_users_add(&db, "ada@example.com", "Ada").unwrap();

    let users = db.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "ada@example.com");

    assert!(commands::cmd_users_list(&db).is_ok());
}

#[test]
fn test_cmd_users_add_rejects_bad_email() {
    let db = setup_test_db();
    let result = commands::cmd_users_add(&db, "not-an-email", "Ada");
    assert!(result.is_err());
    assert_eq!(db.list_users().unwrap().len(), 0);
}

#[test]
fn test_cmd_users_add_duplicate_email() {
    let db = setup_test_db();
    commands::cmd_users_add(&db, "ada@example.com", "Ada").unwrap();
    let result = commands::cmd_users_add(&db, "ada@example.com", "Other Ada");
    assert!(result.is_err());
}

// ========== Accounts Command Tests ==========

#[test]
fn test_cmd_accounts_add_and_list() {
    let db = setup_test_db();
    let user = db.create_user("ada@example.com", "Ada").unwrap();

    commands::cmd_accounts_add(&db, "Main", "Revolut", Some(user.id), Some("EUR")).unwrap();

    let accounts = db.list_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].bank, "revolut");
    assert_eq!(accounts[0].currency.as_deref(), Some("EUR"));

    assert!(commands::cmd_accounts_list(&db).is_ok());
}

#[test]
fn test_cmd_accounts_add_unknown_currency() {
    let db = setup_test_db();
    let result = commands::cmd_accounts_add(&db, "Main", "revolut", None, Some("EURO"));
    assert!(result.is_err());
    assert_eq!(db.list_accounts().unwrap().len(), 0);
}

#[test]
fn test_cmd_accounts_add_missing_user() {
    let db = setup_test_db();
    let result = commands::cmd_accounts_add(&db, "Main", "revolut", Some(999), None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_accounts_add_unmapped_bank_is_allowed() {
    // Designators without a mapper are stored; only imports are rejected.
    let db = setup_test_db();
    commands::cmd_accounts_add(&db, "Legacy", "monzo", None, None).unwrap();
    assert_eq!(db.list_accounts().unwrap()[0].bank, "monzo");
}

// ========== Init/Status Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("moneta.db");

    commands::cmd_init(&db_path, true).unwrap();
    assert!(db_path.exists());

    // Reopening an initialized database succeeds
    assert!(commands::cmd_status(&db_path, true).is_ok());
}

#[test]
fn test_cmd_status_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("missing.db");
    assert!(commands::cmd_status(&db_path, true).is_ok());
}

// ========== Import Command Tests ==========

#[tokio::test]
async fn test_cmd_import_revolut_csv() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("moneta.db");
    let file_path = dir.path().join("statement.csv");
    std::fs::write(&file_path, REVOLUT_CSV).unwrap();

    let db = Database::new_unencrypted(db_path.to_str().unwrap()).unwrap();
    let account_id = db.create_account(None, "Main", "revolut", Some("EUR")).unwrap();

    commands::cmd_import(&db_path, &file_path, account_id, None, true)
        .await
        .unwrap();

    assert_eq!(db.count_transactions(account_id).unwrap(), 2);
    let statements = db.list_statements(account_id).unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].transaction_count, 2);
}

#[tokio::test]
async fn test_cmd_import_unknown_account() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("moneta.db");
    let file_path = dir.path().join("statement.csv");
    std::fs::write(&file_path, REVOLUT_CSV).unwrap();

    // Initialize the schema before importing
    Database::new_unencrypted(db_path.to_str().unwrap()).unwrap();

    let result = commands::cmd_import(&db_path, &file_path, 42, None, true).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_import_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("moneta.db");
    let file_path = dir.path().join("statement.pdf");
    std::fs::write(&file_path, b"%PDF-1.4").unwrap();

    let db = Database::new_unencrypted(db_path.to_str().unwrap()).unwrap();
    let account_id = db.create_account(None, "Main", "revolut", None).unwrap();

    let result = commands::cmd_import(&db_path, &file_path, account_id, None, true).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("--mime"));
}

// ========== Transactions Command Tests ==========

#[tokio::test]
async fn test_cmd_transactions_list() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("moneta.db");
    let file_path = dir.path().join("statement.csv");
    std::fs::write(&file_path, REVOLUT_CSV).unwrap();

    let db = Database::new_unencrypted(db_path.to_str().unwrap()).unwrap();
    let account_id = db.create_account(None, "Main", "revolut", None).unwrap();
    commands::cmd_import(&db_path, &file_path, account_id, None, true)
        .await
        .unwrap();

    assert!(commands::cmd_transactions_list(&db, Some(account_id), None, 20).is_ok());
    assert!(commands::cmd_transactions_list(&db, None, Some("other"), 20).is_ok());

    let result = commands::cmd_transactions_list(&db, None, Some("bogus"), 20);
    assert!(result.is_err());
}
