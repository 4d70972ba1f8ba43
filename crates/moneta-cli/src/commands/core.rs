//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use moneta_core::db::{Database, DB_KEY_ENV};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8"))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a user: moneta users add --email you@example.com --name You");
    println!("  2. Add an account: moneta accounts add --name Main --bank revolut");
    println!("  3. Import a statement: moneta import --file statement.csv --account 1");
    println!("  4. Start the API: moneta serve");

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Moneta Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                println!();
                if let Ok(users) = db.list_users() {
                    println!("   Users: {}", users.len());
                }
                if let Ok(accounts) = db.list_accounts() {
                    println!("   Accounts: {}", accounts.len());
                    let mut total = 0;
                    for account in &accounts {
                        if let Ok(count) = db.count_transactions(account.id) {
                            total += count;
                        }
                    }
                    println!("   Transactions: {}", total);
                }
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
