//! Data Transfer Objects (DTOs) for requests and seed data.

use chrono::{DateTime, Utc};
use currencies::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw query parameters of a conversion request.
///
/// Every field is optional and untyped so that missing and malformed values
/// are reported together by validation instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuery {
    /// Source currency code, e.g. `EUR`
    pub source_currency: Option<String>,
    /// Target currency code, e.g. `USD`
    pub target_currency: Option<String>,
    /// Optional as-of instant in UTC, e.g. `2023-12-31T00:00:00Z`
    pub date: Option<String>,
}

/// A rate record to be inserted into a rate store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeRate {
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    #[serde(rename = "exchangeRate")]
    pub rate: Decimal,
    pub effective_start_date: DateTime<Utc>,
}
