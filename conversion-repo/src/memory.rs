//! In-memory rate store adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use conversion_types::{CurrencyCode, ExchangeRate, NewExchangeRate, RateStore, StoreError};

type Pair = (CurrencyCode, CurrencyCode);

/// Rates kept per pair, ordered by effective start date.
///
/// A second record with the same pair and effective start date replaces the first.
#[derive(Default)]
pub struct MemoryRateStore {
    rates: DashMap<Pair, BTreeMap<DateTime<Utc>, ExchangeRate>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rate record.
    pub fn insert(&self, rate: NewExchangeRate) -> Result<ExchangeRate, StoreError> {
        let record = ExchangeRate::new(
            rate.source_currency,
            rate.target_currency,
            rate.rate,
            rate.effective_start_date,
        )?;
        self.store(record.clone());
        Ok(record)
    }

    /// Inserts several records, or none if any of them is invalid.
    pub fn insert_rates(&self, rates: Vec<NewExchangeRate>) -> Result<Vec<ExchangeRate>, StoreError> {
        let records = rates
            .into_iter()
            .map(|rate| {
                ExchangeRate::new(
                    rate.source_currency,
                    rate.target_currency,
                    rate.rate,
                    rate.effective_start_date,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        for record in &records {
            self.store(record.clone());
        }
        Ok(records)
    }

    fn store(&self, record: ExchangeRate) {
        self.rates
            .entry((record.source_currency, record.target_currency))
            .or_default()
            .insert(record.effective_start_date, record);
    }

    /// Number of stored records across all pairs.
    pub fn len(&self) -> usize {
        self.rates.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn find_latest_rate(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        as_of: DateTime<Utc>,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        Ok(self.rates.get(&(source, target)).and_then(|history| {
            history
                .range(..=as_of)
                .next_back()
                .map(|(_, rate)| rate.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn new_rate(rate: rust_decimal::Decimal, effective: DateTime<Utc>) -> NewExchangeRate {
        NewExchangeRate {
            source_currency: CurrencyCode::EUR,
            target_currency: CurrencyCode::USD,
            rate,
            effective_start_date: effective,
        }
    }

    #[tokio::test]
    async fn test_latest_at_or_before() {
        let store = MemoryRateStore::new();
        store.insert(new_rate(dec!(1.05), day(1))).unwrap();
        store.insert(new_rate(dec!(1.08), day(10))).unwrap();
        store.insert(new_rate(dec!(1.11), day(20))).unwrap();

        let mid = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, day(15))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mid.rate, dec!(1.08));

        let boundary = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, day(20))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(boundary.rate, dec!(1.11));
    }

    #[tokio::test]
    async fn test_nothing_before_first_record() {
        let store = MemoryRateStore::new();
        store.insert(new_rate(dec!(1.05), day(10))).unwrap();

        let found = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, day(9))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_pairs_are_directional() {
        let store = MemoryRateStore::new();
        store.insert(new_rate(dec!(1.05), day(1))).unwrap();

        let found = store
            .find_latest_rate(CurrencyCode::USD, CurrencyCode::EUR, day(2))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let store = MemoryRateStore::new();
        assert!(matches!(
            store.insert(new_rate(dec!(-1), day(1))),
            Err(StoreError::InvalidRecord(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_batch_with_invalid_record_stores_nothing() {
        let store = MemoryRateStore::new();
        let result = store.insert_rates(vec![
            new_rate(dec!(1.05), day(1)),
            new_rate(dec!(-1), day(2)),
        ]);

        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_same_effective_date_replaces() {
        let store = MemoryRateStore::new();
        store.insert(new_rate(dec!(1.05), day(1))).unwrap();
        store.insert(new_rate(dec!(1.06), day(1))).unwrap();
        assert_eq!(store.len(), 1);
    }
}
