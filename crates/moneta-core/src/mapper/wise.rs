//! Wise statement mapping
//!
//! Wise exports carry `Date, Description, Amount, Currency` columns (some
//! layouts add `Running Balance`) with date-only values, either ISO
//! `YYYY-MM-DD` or European `DD-MM-YYYY`.

use chrono::{NaiveDate, NaiveDateTime};

use super::{parse_amount, require, Violation};
use crate::models::TransactionDraft;
use crate::parser::RawRecord;

pub(super) fn map_record(record: &RawRecord) -> Result<TransactionDraft, Violation> {
    let date = parse_date(require(record, "date")?)?;

    let amount = parse_amount(require(record, "amount")?)?;
    let end_balance = record.get("runningBalance").map(parse_amount).transpose()?;

    Ok(TransactionDraft {
        started_date: date,
        completed_date: date,
        description: require(record, "description")?.to_string(),
        amount,
        currency: require(record, "currency")?.to_uppercase(),
        start_balance: None,
        end_balance,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDateTime, Violation> {
    for format in ["%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            // Date-only exports; midnight is the only defensible timestamp
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }
    Err(Violation::new(
        "date",
        format!("not a valid date: {:?}", raw),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RawRecord {
        let mut r = RawRecord::new();
        r.insert("date", "2024-01-15");
        r.insert("description", "Grocery Market");
        r.insert("amount", "-42.10");
        r.insert("currency", "USD");
        r
    }

    #[test]
    fn test_map_record() {
        let draft = map_record(&record()).unwrap();
        assert_eq!(draft.description, "Grocery Market");
        assert_eq!(draft.amount, -42.10);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.started_date, draft.completed_date);
        assert_eq!(
            draft.started_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-01-15 00:00:00"
        );
    }

    #[test]
    fn test_european_date_format() {
        let mut r = record();
        r.insert("date", "15-01-2024");
        let draft = map_record(&r).unwrap();
        assert_eq!(draft.started_date.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_running_balance() {
        let mut r = record();
        r.insert("runningBalance", "1,057.90");
        let draft = map_record(&r).unwrap();
        assert_eq!(draft.end_balance, Some(1057.90));
    }

    #[test]
    fn test_bad_date() {
        let mut r = record();
        r.insert("date", "January 15");
        let v = map_record(&r).unwrap_err();
        assert_eq!(v.field, "date");
    }
}
