//! User and account management commands

use anyhow::{anyhow, Result};
use moneta_core::db::Database;
use moneta_core::{currencies, models::Bank};

pub fn cmd_users_add(db: &Database, email: &str, name: &str) -> Result<()> {
    let email = email.trim();
    let name = name.trim();
    if !email.contains('@') {
        return Err(anyhow!("Invalid email address: {}", email));
    }
    if name.is_empty() {
        return Err(anyhow!("Name must not be empty"));
    }

    let user = db.create_user(email, name)?;
    println!("✅ Created user {} ({})", user.name, user.email);
    println!("   Id: {}", user.id);
    Ok(())
}

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users found. Add one with:");
        println!("  moneta users add --email you@example.com --name You");
        return Ok(());
    }

    println!();
    println!("👤 Users");
    println!("   ─────────────────────────────");

    for user in users {
        println!("   [{}] {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

pub fn cmd_accounts_add(
    db: &Database,
    name: &str,
    bank: &str,
    user_id: Option<i64>,
    currency: Option<&str>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Account name must not be empty"));
    }
    if let Some(code) = currency {
        if !currencies::is_known(code) {
            return Err(anyhow!("Unknown currency code: {}", code));
        }
    }
    if let Some(id) = user_id {
        if db.get_user(id)?.is_none() {
            return Err(anyhow!("User {} not found", id));
        }
    }

    let account_id = db.create_account(user_id, name, bank, currency)?;
    println!("✅ Created account {} ({})", name, bank.to_lowercase());
    println!("   Id: {}", account_id);

    // The bank designator is free-form; warn early if statements for it
    // cannot be imported yet.
    if bank.parse::<Bank>().is_err() {
        println!(
            "   ⚠️  Bank '{}' has no statement mapper; imports will be rejected",
            bank.to_lowercase()
        );
    }

    Ok(())
}

pub fn cmd_accounts_list(db: &Database) -> Result<()> {
    let accounts = db.list_accounts()?;

    if accounts.is_empty() {
        println!("No accounts found. Add one with:");
        println!("  moneta accounts add --name Main --bank revolut");
        return Ok(());
    }

    println!();
    println!("📁 Accounts");
    println!("   ─────────────────────────────");

    for account in accounts {
        let currency = account.currency.as_deref().unwrap_or("-");
        let owner = account
            .user_id
            .map(|id| format!("user {}", id))
            .unwrap_or_else(|| "unowned".to_string());
        println!(
            "   [{}] {} ({}, {}, {})",
            account.id, account.name, account.bank, currency, owner
        );
    }

    Ok(())
}
