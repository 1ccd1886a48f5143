//! SQLite rate store integration tests.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use conversion_types::{CurrencyCode, NewExchangeRate, RateStore, StoreError};

    use crate::{Rates, SqliteRateStore, build_rates};

    async fn setup_store() -> SqliteRateStore {
        SqliteRateStore::new("sqlite::memory:").await.unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn eur_usd(rate: Decimal, effective: DateTime<Utc>) -> NewExchangeRate {
        NewExchangeRate {
            source_currency: CurrencyCode::EUR,
            target_currency: CurrencyCode::USD,
            rate,
            effective_start_date: effective,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = setup_store().await;
        let inserted = store.insert_rate(eur_usd(dec!(1.1234), at(3, 12))).await.unwrap();

        let found = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(4, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, inserted);
        assert_eq!(found.rate, dec!(1.1234));
    }

    #[tokio::test]
    async fn test_latest_record_wins() {
        let store = setup_store().await;
        store
            .insert_rates(vec![
                eur_usd(dec!(1.10), at(1, 0)),
                eur_usd(dec!(1.12), at(5, 0)),
                eur_usd(dec!(1.15), at(9, 0)),
            ])
            .await
            .unwrap();

        let found = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(6, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.rate, dec!(1.12));
        assert_eq!(found.effective_start_date, at(5, 0));
    }

    #[tokio::test]
    async fn test_effective_date_is_inclusive() {
        let store = setup_store().await;
        let effective = at(3, 12) + Duration::microseconds(250);
        store.insert_rate(eur_usd(dec!(1.1), effective)).await.unwrap();

        let exact = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, effective)
            .await
            .unwrap();
        let before = store
            .find_latest_rate(
                CurrencyCode::EUR,
                CurrencyCode::USD,
                effective - Duration::microseconds(1),
            )
            .await
            .unwrap();

        assert!(exact.is_some());
        assert!(before.is_none());
    }

    #[tokio::test]
    async fn test_missing_pair_returns_none() {
        let store = setup_store().await;
        store.insert_rate(eur_usd(dec!(1.1), at(1, 0))).await.unwrap();

        let reversed = store
            .find_latest_rate(CurrencyCode::USD, CurrencyCode::EUR, at(2, 0))
            .await
            .unwrap();

        assert!(reversed.is_none());
    }

    #[tokio::test]
    async fn test_negative_rate_rejected_and_batch_rolled_back() {
        let store = setup_store().await;

        let result = store
            .insert_rates(vec![eur_usd(dec!(1.1), at(1, 0)), eur_usd(dec!(-2), at(2, 0))])
            .await;

        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
        let found = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(3, 0))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_same_effective_date_replaces() {
        let store = setup_store().await;
        store.insert_rate(eur_usd(dec!(1.10), at(1, 0))).await.unwrap();
        let replacement = store.insert_rate(eur_usd(dec!(1.12), at(1, 0))).await.unwrap();

        let found = store
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(2, 0))
            .await
            .unwrap()
            .unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exchange_rates")
            .fetch_one(store.pool())
            .await
            .unwrap();

        assert_eq!(found, replacement);
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_rates_batch_with_invalid_record_stores_nothing() {
        let rates = build_rates("sqlite::memory:").await.unwrap();
        let batch = vec![
            eur_usd(dec!(1.1), at(1, 0)),
            NewExchangeRate {
                source_currency: CurrencyCode::GBP,
                target_currency: CurrencyCode::USD,
                rate: dec!(-1),
                effective_start_date: at(1, 0),
            },
        ];

        let result = rates.insert_rates(batch).await;

        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
        let found = rates
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(2, 0))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let store = setup_store().await;
        store.create_schema().await.unwrap();
        store.create_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_build_rates_selects_sqlite() {
        let rates = build_rates("sqlite::memory:").await.unwrap();
        assert!(matches!(rates, Rates::Sqlite(_)));

        rates.insert_rate(eur_usd(dec!(0.85), at(1, 0))).await.unwrap();
        let found = rates
            .find_latest_rate(CurrencyCode::EUR, CurrencyCode::USD, at(2, 0))
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.rate), Some(dec!(0.85)));
    }
}
