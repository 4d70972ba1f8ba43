//! Statement import command implementation

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use moneta_core::ai::AIClient;
use moneta_core::{StatementIngestor, StatementUpload, TransactionCategorizer};

use super::{open_db, truncate};

pub async fn cmd_import(
    db_path: &Path,
    file: &Path,
    account_id: i64,
    mime_override: Option<&str>,
    no_encrypt: bool,
) -> Result<()> {
    let bytes =
        fs::read(file).with_context(|| format!("Failed to read file: {}", file.display()))?;
    if bytes.is_empty() {
        return Err(anyhow!("File is empty: {}", file.display()));
    }

    let mime_type = match mime_override {
        Some(mime) => mime.to_string(),
        None => guess_mime_type(file)
            .ok_or_else(|| anyhow!("Cannot determine file type; specify --mime"))?,
    };
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    println!("📥 Importing {} into account {}...", file.display(), account_id);

    let db = open_db(db_path, no_encrypt)?;

    let ai = AIClient::from_env();
    match &ai {
        Some(client) => {
            use moneta_core::ai::AIBackend;
            println!("   🤖 Categorization model: {} at {}", client.model(), client.host());
        }
        None => {
            println!("   💡 Tip: Set OLLAMA_HOST to enable AI categorization");
        }
    }

    let categorizer = TransactionCategorizer::new(ai);
    let ingestor = StatementIngestor::new(&db, categorizer);
    let (statement, transactions) = ingestor
        .ingest(StatementUpload {
            account_id,
            bytes,
            mime_type,
            filename,
        })
        .await?;

    println!("✅ Import complete!");
    println!("   Statement: {}", statement.id);
    println!("   Transactions: {}", statement.transaction_count);

    for tx in &transactions {
        println!(
            "   {} │ {:>10.2} {} │ {:<12} │ {}",
            tx.completed_date.format("%Y-%m-%d"),
            tx.amount,
            tx.currency,
            tx.category.as_str(),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}

/// Guess the statement MIME type from the file extension
fn guess_mime_type(file: &Path) -> Option<String> {
    match file
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("csv") => Some("text/csv".to_string()),
        Some("xls") => Some("application/vnd.ms-excel".to_string()),
        Some("xlsx") => Some(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod guess_tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(
            guess_mime_type(&PathBuf::from("jan.csv")).as_deref(),
            Some("text/csv")
        );
        assert_eq!(
            guess_mime_type(&PathBuf::from("Jan.XLSX")).as_deref(),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
        assert_eq!(guess_mime_type(&PathBuf::from("jan.pdf")), None);
        assert_eq!(guess_mime_type(&PathBuf::from("statement")), None);
    }
}
