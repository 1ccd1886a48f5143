//! The value produced by a successful resolution.

use chrono::{DateTime, Utc};
use currencies::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A resolved rate between two currencies.
///
/// Built fresh on every resolution. Only triangular and base results are
/// written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    #[serde(rename = "exchangeRate")]
    pub rate: Decimal,
    #[serde(rename = "effectiveStartDate")]
    pub effective_date: DateTime<Utc>,
}

impl ConversionResult {
    pub fn new(
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: Decimal,
        effective_date: DateTime<Utc>,
    ) -> Self {
        Self {
            source_currency,
            target_currency,
            rate,
            effective_date,
        }
    }

    /// The rate of a currency against itself.
    pub fn identity(currency: CurrencyCode, effective_date: DateTime<Utc>) -> Self {
        Self::new(currency, currency, Decimal::ONE, effective_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wire_field_names() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let result = ConversionResult::new(CurrencyCode::EUR, CurrencyCode::USD, dec!(1.1234), at);

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["sourceCurrency"], "EUR");
        assert_eq!(json["targetCurrency"], "USD");
        assert_eq!(json["exchangeRate"], "1.1234");
        assert_eq!(json["effectiveStartDate"], "2023-12-31T00:00:00Z");
    }

    #[test]
    fn test_identity_rate_is_one() {
        let result = ConversionResult::identity(CurrencyCode::JPY, Utc::now());
        assert_eq!(result.rate, Decimal::ONE);
        assert_eq!(result.source_currency, result.target_currency);
    }
}
