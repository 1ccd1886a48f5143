//! ConversionService unit tests.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use conversion_types::{AnchorCurrencies, AppError, ConvertQuery, CurrencyCode};

    use crate::engine_tests::tests::{MockCache, MockRates};
    use crate::{ConversionService, ResolutionEngine};

    fn service(rates: MockRates) -> ConversionService<MockRates, MockCache> {
        ConversionService::new(ResolutionEngine::new(
            rates,
            MockCache::new(),
            AnchorCurrencies::default(),
        ))
    }

    fn query(source: Option<&str>, target: Option<&str>, date: Option<&str>) -> ConvertQuery {
        ConvertQuery {
            source_currency: source.map(String::from),
            target_currency: target.map(String::from),
            date: date.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_convert_success() {
        let effective = Utc.with_ymd_and_hms(2023, 12, 30, 0, 0, 0).unwrap();
        let rates = MockRates::new().with_rate(
            CurrencyCode::EUR,
            CurrencyCode::USD,
            dec!(1.1234),
            effective,
        );
        let service = service(rates);

        let result = service
            .convert(&query(Some("EUR"), Some("USD"), Some("2023-12-31T00:00:00Z")))
            .await
            .unwrap();

        assert_eq!(result.rate, dec!(1.1234));
        assert_eq!(result.effective_date, effective);
    }

    #[tokio::test]
    async fn test_validation_errors_reported_together_before_resolution() {
        let service = service(MockRates::new());

        let result = service.convert(&query(Some("XXX"), None, None)).await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("sourceCurrency"), Some("Source currency is not valid"));
                assert_eq!(errors.get("targetCurrency"), Some("This field is required"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.engine().rate_store().calls().is_empty());
        assert_eq!(service.engine().cache().reads(), 0);
    }

    #[tokio::test]
    async fn test_future_date_rejected() {
        let service = service(MockRates::new());
        let tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339();

        let result = service
            .convert(&query(Some("EUR"), Some("USD"), Some(&tomorrow)))
            .await;

        assert!(matches!(result, Err(AppError::Validation(e)) if e.contains("date")));
        assert!(service.engine().rate_store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_same_currency_short_circuits() {
        let service = service(MockRates::new());

        let result = service
            .convert(&query(Some("CHF"), Some("CHF"), None))
            .await
            .unwrap();

        assert_eq!(result.rate, dec!(1));
        assert!(service.engine().rate_store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_pair_is_not_found() {
        let service = service(MockRates::new());

        let result = service.convert(&query(Some("EUR"), Some("USD"), None)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.engine().cache().writes().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let rates = MockRates::new().failing_on(CurrencyCode::EUR, CurrencyCode::USD);
        let service = service(rates);

        let result = service.convert(&query(Some("EUR"), Some("USD"), None)).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
