//! Transaction command implementations

use anyhow::{anyhow, Result};
use moneta_core::db::{Database, TransactionQuery};
use moneta_core::models::Category;

use super::truncate;

pub fn cmd_transactions_list(
    db: &Database,
    account_id: Option<i64>,
    category: Option<&str>,
    limit: i64,
) -> Result<()> {
    let category = category
        .map(|label| {
            Category::from_label(label).ok_or_else(|| anyhow!("Unknown category: {}", label))
        })
        .transpose()?;

    let transactions = db.list_transactions(&TransactionQuery {
        account_id,
        category,
        limit: Some(limit),
        offset: Some(0),
    })?;

    if transactions.is_empty() {
        println!("No transactions found. Import a statement with:");
        println!("  moneta import --file statement.csv --account 1");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.amount < 0.0 {
            format!("\x1b[31m{:.2} {}\x1b[0m", tx.amount, tx.currency) // Red for expenses
        } else {
            format!("\x1b[32m+{:.2} {}\x1b[0m", tx.amount, tx.currency) // Green for income
        };

        println!(
            "   {} │ {:>16} │ {:<12} │ {}",
            tx.completed_date.format("%Y-%m-%d"),
            amount_str,
            tx.category.as_str(),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}
