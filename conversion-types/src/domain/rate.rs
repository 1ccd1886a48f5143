//! Persisted exchange rate records and fixed-precision rate arithmetic.

use chrono::{DateTime, Utc};
use currencies::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Number of decimal places kept by every rounded rate (inverse and base).
pub const RATE_PRECISION: u32 = 10;

/// Unique identifier for an ExchangeRate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateId(Uuid);

impl RateId {
    /// Creates a new random RateId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RateId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A rate from `source_currency` to `target_currency`, effective from
/// `effective_start_date` until superseded by a later record for the same pair.
///
/// Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: RateId,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub rate: Decimal,
    pub effective_start_date: DateTime<Utc>,
}

impl ExchangeRate {
    /// Creates a new record with a fresh id.
    ///
    /// # Validation
    /// - Rate cannot be negative
    pub fn new(
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: Decimal,
        effective_start_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if rate < Decimal::ZERO {
            return Err(DomainError::NegativeRate(rate));
        }
        Ok(Self {
            id: RateId::new(),
            source_currency,
            target_currency,
            rate,
            effective_start_date,
        })
    }

    /// Reconstructs a record loaded from storage.
    pub fn from_parts(
        id: RateId,
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: Decimal,
        effective_start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_currency,
            target_currency,
            rate,
            effective_start_date,
        }
    }
}

/// Rounds a rate to [`RATE_PRECISION`] places, half-up.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator` rounded with [`round_rate`].
///
/// Returns `None` when the denominator is zero or the quotient overflows.
pub fn divide_rates(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator.checked_div(denominator).map(round_rate)
}
