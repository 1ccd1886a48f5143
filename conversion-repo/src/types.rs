//! Database row types and column encodings.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use conversion_types::{CurrencyCode, ExchangeRate, RateId, StoreError};

/// Exchange rate row from database.
#[derive(FromRow)]
pub struct DbExchangeRate {
    pub id: String,
    pub source_currency: String,
    pub target_currency: String,
    pub rate: String,
    pub effective_start_date: String,
}

impl DbExchangeRate {
    pub fn into_domain(self) -> Result<ExchangeRate, StoreError> {
        let id = RateId::from_str(&self.id).map_err(corrupt("id"))?;
        let source = CurrencyCode::from_str(&self.source_currency).map_err(corrupt("source_currency"))?;
        let target = CurrencyCode::from_str(&self.target_currency).map_err(corrupt("target_currency"))?;
        let rate = Decimal::from_str(&self.rate).map_err(corrupt("rate"))?;
        let effective = decode_instant(&self.effective_start_date)?;

        Ok(ExchangeRate::from_parts(id, source, target, rate, effective))
    }
}

/// Fixed-width RFC 3339 in UTC with microseconds, e.g. `2024-01-03T12:00:00.000000Z`.
///
/// Every stored instant has the same width so string comparison in SQL
/// orders them chronologically.
pub fn encode_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_instant(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(corrupt("effective_start_date"))
}

fn corrupt<E: std::fmt::Display>(column: &'static str) -> impl Fn(E) -> StoreError {
    move |e| StoreError::Serialization(format!("{}: {}", column, e))
}
