//! Reference data handlers

use axum::Json;

use moneta_core::currencies::{Currency, CURRENCIES};

/// GET /api/currencies - List supported currencies
pub async fn list_currencies() -> Json<&'static [Currency]> {
    Json(CURRENCIES)
}
