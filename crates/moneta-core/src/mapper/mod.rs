//! Per-bank statement mapping
//!
//! A mapper turns the parser's [`RawRecord`]s into [`TransactionDraft`]s for
//! one bank's export layout. Mapping is all-or-nothing: the first record that
//! fails to map or validate aborts the whole call with the offending row
//! index, so a statement never half-imports.

mod revolut;
mod wise;

use crate::error::{Error, Result};
use crate::models::{Bank, TransactionDraft};
use crate::parser::RawRecord;

/// A single failed constraint, reported against a field of one record
#[derive(Debug)]
pub(crate) struct Violation {
    pub field: &'static str,
    pub constraint: String,
}

impl Violation {
    fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Map every record for the given bank, validating each draft
pub fn map_records(bank: Bank, records: &[RawRecord]) -> Result<Vec<TransactionDraft>> {
    let mut drafts = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let draft = match bank {
            Bank::Revolut => revolut::map_record(record),
            Bank::Wise => wise::map_record(record),
        }
        .and_then(|d| validate_draft(d))
        .map_err(|v| Error::Validation {
            row,
            field: v.field,
            constraint: v.constraint,
        })?;
        drafts.push(draft);
    }
    Ok(drafts)
}

/// Constraints every draft must satisfy regardless of source bank
fn validate_draft(mut draft: TransactionDraft) -> std::result::Result<TransactionDraft, Violation> {
    draft.description = collapse_whitespace(&draft.description);
    if draft.description.is_empty() {
        return Err(Violation::new("description", "must not be empty"));
    }
    if draft.description.chars().count() > 255 {
        return Err(Violation::new("description", "must be at most 255 characters"));
    }

    if !draft.amount.is_finite() {
        return Err(Violation::new("amount", "must be a finite number"));
    }
    let cents = draft.amount * 100.0;
    if (cents.round() - cents).abs() > 1e-6 {
        return Err(Violation::new(
            "amount",
            "must have at most 2 fractional digits",
        ));
    }
    if draft.amount.abs() > 999_999_999_999.99 {
        return Err(Violation::new("amount", "exceeds the supported range"));
    }

    if draft.currency.len() != 3
        || !draft.currency.chars().all(|c| c.is_ascii_uppercase())
    {
        return Err(Violation::new(
            "currency",
            "must be a 3-letter uppercase code",
        ));
    }

    Ok(draft)
}

/// Collapse runs of whitespace to single spaces and trim the ends
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a statement amount cell
///
/// Accepts thousands separators, a leading currency symbol, and the
/// accounting convention of parentheses for negative values.
fn parse_amount(raw: &str) -> std::result::Result<f64, Violation> {
    let trimmed = raw.trim();
    let (body, negate) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (&trimmed[1..trimmed.len() - 1], true)
    } else {
        (trimmed, false)
    };
    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '€' | '£'))
        .collect();
    let value: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| Violation::new("amount", format!("not a number: {:?}", raw)))?;
    Ok(if negate { -value } else { value })
}

/// Fetch a required field from a record
fn require<'a>(record: &'a RawRecord, key: &'static str) -> std::result::Result<&'a str, Violation> {
    record
        .get(key)
        .ok_or_else(|| Violation::new(key, "is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(description: &str, amount: f64, currency: &str) -> TransactionDraft {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        TransactionDraft {
            started_date: date,
            completed_date: date,
            description: description.to_string(),
            amount,
            currency: currency.to_string(),
            start_balance: None,
            end_balance: None,
        }
    }

    #[test]
    fn test_validate_collapses_whitespace() {
        let d = validate_draft(draft("  Coffee   Shop \t Ltd ", -3.5, "EUR")).unwrap();
        assert_eq!(d.description, "Coffee Shop Ltd");
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let v = validate_draft(draft("   ", -3.5, "EUR")).unwrap_err();
        assert_eq!(v.field, "description");
    }

    #[test]
    fn test_validate_rejects_long_description() {
        let v = validate_draft(draft(&"x".repeat(256), -3.5, "EUR")).unwrap_err();
        assert_eq!(v.field, "description");
    }

    #[test]
    fn test_validate_rejects_sub_cent_precision() {
        let v = validate_draft(draft("Coffee", -3.501, "EUR")).unwrap_err();
        assert_eq!(v.field, "amount");
        assert!(validate_draft(draft("Coffee", -3.50, "EUR")).is_ok());
        assert!(validate_draft(draft("Coffee", 2500.0, "EUR")).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_currency() {
        assert_eq!(validate_draft(draft("Coffee", -3.5, "eur")).unwrap_err().field, "currency");
        assert_eq!(validate_draft(draft("Coffee", -3.5, "EURO")).unwrap_err().field, "currency");
        assert_eq!(validate_draft(draft("Coffee", -3.5, "E1R")).unwrap_err().field, "currency");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-3.50").unwrap(), -3.50);
        assert_eq!(parse_amount("1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("$25.00").unwrap(), 25.00);
        assert_eq!(parse_amount("(12.00)").unwrap(), -12.00);
        assert!(parse_amount("n/a").is_err());
    }

    #[test]
    fn test_map_records_reports_row_index() {
        let mut good = RawRecord::new();
        good.insert("date", "2024-01-15");
        good.insert("description", "Coffee");
        good.insert("amount", "-3.50");
        good.insert("currency", "EUR");

        let mut bad = good.clone();
        bad.insert("amount", "not-a-number");

        let err = map_records(Bank::Wise, &[good, bad]).unwrap_err();
        match err {
            Error::Validation { row, field, .. } => {
                assert_eq!(row, 1);
                assert_eq!(field, "amount");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
