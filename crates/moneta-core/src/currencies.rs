//! Supported currency reference data

use serde::Serialize;

/// An ISO 4217 currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
}

/// Currencies offered when creating accounts
pub const CURRENCIES: &[Currency] = &[
    Currency { code: "AUD", name: "Australian Dollar" },
    Currency { code: "BGN", name: "Bulgarian Lev" },
    Currency { code: "CAD", name: "Canadian Dollar" },
    Currency { code: "CHF", name: "Swiss Franc" },
    Currency { code: "CZK", name: "Czech Koruna" },
    Currency { code: "DKK", name: "Danish Krone" },
    Currency { code: "EUR", name: "Euro" },
    Currency { code: "GBP", name: "British Pound" },
    Currency { code: "HUF", name: "Hungarian Forint" },
    Currency { code: "JPY", name: "Japanese Yen" },
    Currency { code: "NOK", name: "Norwegian Krone" },
    Currency { code: "NZD", name: "New Zealand Dollar" },
    Currency { code: "PLN", name: "Polish Zloty" },
    Currency { code: "RON", name: "Romanian Leu" },
    Currency { code: "SEK", name: "Swedish Krona" },
    Currency { code: "SGD", name: "Singapore Dollar" },
    Currency { code: "TRY", name: "Turkish Lira" },
    Currency { code: "USD", name: "US Dollar" },
];

/// Whether a code appears in the supported list
pub fn is_known(code: &str) -> bool {
    CURRENCIES.iter().any(|c| c.code == code)
}
