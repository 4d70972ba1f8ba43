//! Statement file parsing
//!
//! A parser turns uploaded bytes into a sequence of [`RawRecord`]s without
//! knowing anything about banks. Header names are normalized to camelCase so
//! the per-bank mappers can look fields up by a stable key regardless of how
//! the bank capitalizes or punctuates its column headers.

mod csv;
mod excel;

use std::collections::HashMap;

use crate::error::{Error, Result};

/// One row of an uploaded statement, keyed by normalized header name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field by normalized key, `None` when absent or empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

/// Normalize a header cell to a camelCase lookup key
///
/// "Started Date" -> "startedDate", "Running Bal." -> "runningBal",
/// "AMOUNT" -> "amount". Non-alphanumeric characters act as word breaks
/// and are dropped.
pub fn normalize_key(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut break_before = false;
    for ch in header.chars() {
        if !ch.is_alphanumeric() {
            break_before = true;
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if break_before {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        break_before = false;
    }
    out
}

/// Supported statement file formats, selected by MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementParser {
    Csv,
    Excel,
}

impl StatementParser {
    /// Select a parser for a MIME type
    ///
    /// Parameters after `;` are ignored and matching is case-insensitive,
    /// so `text/csv; charset=utf-8` selects the CSV parser.
    pub fn for_mime(mime_type: &str) -> Result<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        match essence.as_str() {
            "text/csv" | "application/csv" | "text/plain" => Ok(Self::Csv),
            "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Ok(Self::Excel)
            }
            _ => Err(Error::UnsupportedFormat(mime_type.to_string())),
        }
    }

    /// Parse uploaded bytes into records with normalized keys
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<RawRecord>> {
        match self {
            Self::Csv => csv::parse(bytes),
            Self::Excel => excel::parse(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Started Date"), "startedDate");
        assert_eq!(normalize_key("Running Bal."), "runningBal");
        assert_eq!(normalize_key("AMOUNT"), "amount");
        assert_eq!(normalize_key("description"), "description");
        assert_eq!(normalize_key("  Exchange  Rate  "), "exchangeRate");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_for_mime_selects_csv() {
        assert_eq!(StatementParser::for_mime("text/csv").unwrap(), StatementParser::Csv);
        assert_eq!(
            StatementParser::for_mime("text/csv; charset=utf-8").unwrap(),
            StatementParser::Csv
        );
        assert_eq!(
            StatementParser::for_mime("Application/CSV").unwrap(),
            StatementParser::Csv
        );
        assert_eq!(
            StatementParser::for_mime("text/plain").unwrap(),
            StatementParser::Csv
        );
    }

    #[test]
    fn test_for_mime_selects_excel() {
        assert_eq!(
            StatementParser::for_mime("application/vnd.ms-excel").unwrap(),
            StatementParser::Excel
        );
        assert_eq!(
            StatementParser::for_mime(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            )
            .unwrap(),
            StatementParser::Excel
        );
    }

    #[test]
    fn test_for_mime_rejects_unknown() {
        let err = StatementParser::for_mime("application/pdf").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_raw_record_get_filters_empty() {
        let mut rec = RawRecord::new();
        rec.insert("amount", "12.50");
        rec.insert("fee", "");
        assert_eq!(rec.get("amount"), Some("12.50"));
        assert_eq!(rec.get("fee"), None);
        assert_eq!(rec.get("missing"), None);
    }
}
