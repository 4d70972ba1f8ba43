//! Domain models for Moneta

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A bank account owned by a user
///
/// The `bank` field is the raw designator string as stored; it is resolved
/// to a [`Bank`] when a statement for this account is ingested, so accounts
/// created for banks without a mapper surface `UnsupportedBank` at upload
/// time rather than failing to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    /// Bank designator selecting the statement mapper (e.g. "revolut")
    pub bank: String,
    /// Default currency for display purposes
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Banks with a registered statement mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Revolut,
    Wise,
}

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revolut => "revolut",
            Self::Wise => "wise",
        }
    }
}

impl std::str::FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revolut" => Ok(Self::Revolut),
            "wise" | "transferwise" => Ok(Self::Wise),
            _ => Err(format!("Unknown bank: {}", s)),
        }
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending categories assigned by the categorizer
///
/// Closed set. The same labels are embedded in the model prompt and used to
/// validate model output; [`Category::from_label`] matches byte-for-byte, so
/// a response like `"GROCERIES"` is out-of-set and triggers the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Restaurants,
    Transport,
    Shopping,
    Utilities,
    Entertainment,
    Health,
    Travel,
    Income,
    Transfers,
    /// Catch-all used whenever automatic classification cannot be trusted
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Groceries,
        Category::Restaurants,
        Category::Transport,
        Category::Shopping,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Travel,
        Category::Income,
        Category::Transfers,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Restaurants => "restaurants",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Travel => "travel",
            Self::Income => "income",
            Self::Transfers => "transfers",
            Self::Other => "other",
        }
    }

    /// Strict, case-sensitive lookup against the closed label set
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized, mapper-validated transaction before categorization
///
/// Every draft leaving a mapper has passed `mapper::validate_draft`; mappers
/// fail the whole mapping call rather than emit an invalid draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub started_date: NaiveDateTime,
    pub completed_date: NaiveDateTime,
    /// Trimmed, whitespace-collapsed, 1-255 characters
    pub description: String,
    /// Negative = expense, positive = income; at most 2 fractional digits
    pub amount: f64,
    /// 3-letter ISO code, uppercase
    pub currency: String,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
}

/// A draft with its assigned spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedDraft {
    pub draft: TransactionDraft,
    pub category: Category,
}

/// A persisted transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    /// The statement this transaction was ingested from
    pub statement_id: i64,
    pub started_date: NaiveDateTime,
    pub completed_date: NaiveDateTime,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// A persisted record of one statement ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankStatement {
    pub id: i64,
    pub account_id: i64,
    pub filename: Option<String>,
    /// SHA-256 of the uploaded bytes; stored for traceability, not enforced
    /// as a dedup key
    pub content_hash: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    pub transaction_count: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_round_trip() {
        assert_eq!("revolut".parse::<Bank>().unwrap(), Bank::Revolut);
        assert_eq!("Wise".parse::<Bank>().unwrap(), Bank::Wise);
        assert_eq!("transferwise".parse::<Bank>().unwrap(), Bank::Wise);
        assert!("monzo".parse::<Bank>().is_err());
        assert_eq!(Bank::Revolut.as_str(), "revolut");
    }

    #[test]
    fn test_category_from_label_is_case_sensitive() {
        assert_eq!(Category::from_label("groceries"), Some(Category::Groceries));
        assert_eq!(Category::from_label("GROCERIES"), None);
        assert_eq!(Category::from_label("Groceries"), None);
        assert_eq!(Category::from_label("other"), Some(Category::Other));
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn test_category_labels_unique() {
        let mut labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
