//! Response parsing for AI backends
//!
//! Local models wrap JSON in prose, markdown fences, or both. The parsers
//! here extract the JSON payload from chatty output before deserializing.

use crate::error::{Error, Result};

/// Extract a JSON array of category labels from a model response
///
/// Finds the first `[` and the last `]` so surrounding prose and code
/// fences are ignored. The array must contain exactly `expected_len`
/// strings; a mismatch means the model lost track of the batch.
pub fn parse_category_labels(response: &str, expected_len: usize) -> Result<Vec<String>> {
    let start = response
        .find('[')
        .ok_or_else(|| Error::InvalidData(format!("No JSON array in response: {}", response)))?;
    let end = response
        .rfind(']')
        .ok_or_else(|| Error::InvalidData(format!("No JSON array in response: {}", response)))?;
    if end < start {
        return Err(Error::InvalidData(format!(
            "No JSON array in response: {}",
            response
        )));
    }

    let labels: Vec<String> = serde_json::from_str(&response[start..=end])?;

    if labels.len() != expected_len {
        return Err(Error::InvalidData(format!(
            "Expected {} labels, model returned {}",
            expected_len,
            labels.len()
        )));
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let labels = parse_category_labels(r#"["groceries", "transport"]"#, 2).unwrap();
        assert_eq!(labels, vec!["groceries", "transport"]);
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let response = "Sure! Here are the categories:\n```json\n[\"restaurants\"]\n```\nLet me know if you need anything else.";
        let labels = parse_category_labels(response, 1).unwrap();
        assert_eq!(labels, vec!["restaurants"]);
    }

    #[test]
    fn test_parse_length_mismatch() {
        let err = parse_category_labels(r#"["groceries"]"#, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_parse_no_array() {
        let err = parse_category_labels("I cannot categorize these.", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_parse_not_strings() {
        let err = parse_category_labels("[1, 2]", 2).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
