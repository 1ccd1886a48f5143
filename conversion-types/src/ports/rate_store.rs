//! Rate store port.
//!
//! Adapters (SQLite, in-memory) implement this trait. The engine only reads.

use chrono::{DateTime, Utc};
use currencies::CurrencyCode;

use crate::domain::ExchangeRate;
use crate::error::StoreError;

/// Read access to persisted exchange rates.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    /// Returns the record for `source -> target` with the latest
    /// `effective_start_date` that is at or before `as_of`, if any.
    ///
    /// `Ok(None)` means no such record exists. Infrastructure failures are
    /// reported as `Err`, never as `Ok(None)`.
    async fn find_latest_rate(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        as_of: DateTime<Utc>,
    ) -> Result<Option<ExchangeRate>, StoreError>;
}
