//! Revolut statement mapping
//!
//! Revolut exports carry `Type, Product, Started Date, Completed Date,
//! Description, Amount, Fee, Currency, State, Balance` columns with
//! `YYYY-MM-DD HH:MM:SS` timestamps.

use chrono::NaiveDateTime;

use super::{parse_amount, require, Violation};
use crate::models::TransactionDraft;
use crate::parser::RawRecord;

pub(super) fn map_record(record: &RawRecord) -> Result<TransactionDraft, Violation> {
    let started_date = parse_datetime(require(record, "startedDate")?, "startedDate")?;
    let completed_date = match record.get("completedDate") {
        // Pending transactions have no completion timestamp yet
        Some(raw) => parse_datetime(raw, "completedDate")?,
        None => started_date,
    };

    let amount = parse_amount(require(record, "amount")?)?;
    let end_balance = record.get("balance").map(parse_amount).transpose()?;

    Ok(TransactionDraft {
        started_date,
        completed_date,
        description: require(record, "description")?.to_string(),
        amount,
        currency: require(record, "currency")?.to_uppercase(),
        start_balance: None,
        end_balance,
    })
}

fn parse_datetime(raw: &str, field: &'static str) -> Result<NaiveDateTime, Violation> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| Violation::new(field, format!("not a valid timestamp: {:?}", raw)))
}
