//! CSV statement parsing

use csv::{ReaderBuilder, Trim};

use super::{normalize_key, RawRecord};
use crate::error::{Error, Result};

/// Parse CSV bytes into records keyed by normalized header
pub fn parse(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::MalformedFile(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(normalize_key)
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result
            .map_err(|e| Error::MalformedFile(format!("Failed to read CSV record: {}", e)))?;

        let mut record = RawRecord::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            if !header.is_empty() {
                record.insert(header.clone(), value);
            }
        }
        // Trailing blank lines and separator rows carry no data
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let data = b"Date,Description,Amount\n2024-01-15,Coffee,-3.50\n2024-01-16,Salary,2500.00\n";
        let records = parse(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("date"), Some("2024-01-15"));
        assert_eq!(records[0].get("description"), Some("Coffee"));
        assert_eq!(records[1].get("amount"), Some("2500.00"));
    }

    #[test]
    fn test_parse_normalizes_headers() {
        let data = b"Started Date,Completed Date,Running Bal.\n2024-01-15 10:00:00,2024-01-15 10:01:00,100.00\n";
        let records = parse(data).unwrap();
        assert_eq!(records[0].get("startedDate"), Some("2024-01-15 10:00:00"));
        assert_eq!(records[0].get("runningBal"), Some("100.00"));
    }

    #[test]
    fn test_parse_skips_empty_rows() {
        let data = b"Date,Amount\n2024-01-15,-3.50\n,\n\n2024-01-16,10.00\n";
        let records = parse(data).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let data = b"Date,Description\n2024-01-15 ,  Coffee Shop \n";
        let records = parse(data).unwrap();
        assert_eq!(records[0].get("description"), Some("Coffee Shop"));
    }

    #[test]
    fn test_parse_flexible_row_lengths() {
        let data = b"Date,Description,Amount\n2024-01-15,Coffee\n";
        let records = parse(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("amount"), None);
    }

    #[test]
    fn test_parse_same_bytes_twice_is_identical() {
        let data = b"Started Date,Description,Amount\n2024-01-15 10:00:00,Coffee,-3.50\n2024-01-16 09:00:00,Salary,2500.00\n";
        assert_eq!(parse(data).unwrap(), parse(data).unwrap());
    }

    #[test]
    fn test_parse_unreadable_input() {
        // An unclosed quote makes the reader fail mid-file
        let data = b"Date,Description\n2024-01-15,\"unterminated\n2024-01-16,ok\n";
        let err = parse(data).unwrap_err();
        assert!(matches!(err, Error::MalformedFile(_)));
    }
}
