//! Resolution Engine
//!
//! Resolves the rate between two validated currencies by running the
//! strategies in [`Strategy::CASCADE`] order and returning the first result.
//! Holds no mutable state: every call is an independent orchestration of
//! reads against the injected rate store and cache.

mod strategy;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use conversion_types::{
    AnchorCurrencies, CACHE_TTL, CacheKey, CacheStore, ConversionResult, CurrencyCode, RateStore,
    ResolveError,
};

pub use strategy::Strategy;

/// The pair and instant a single resolution is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub as_of: DateTime<Utc>,
}

impl Lookup {
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.source, self.target, self.as_of)
    }
}

/// Strategy cascade over a rate store and a cache.
///
/// Generic over the ports so adapters are injected at compile time. The
/// anchor list is fixed at construction.
pub struct ResolutionEngine<R: RateStore, C: CacheStore> {
    rates: R,
    cache: C,
    anchors: AnchorCurrencies,
}

impl<R: RateStore, C: CacheStore> ResolutionEngine<R, C> {
    pub fn new(rates: R, cache: C, anchors: AnchorCurrencies) -> Self {
        Self {
            rates,
            cache,
            anchors,
        }
    }

    /// Returns a reference to the underlying rate store.
    pub fn rate_store(&self) -> &R {
        &self.rates
    }

    /// Returns a reference to the underlying cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn anchors(&self) -> &AnchorCurrencies {
        &self.anchors
    }

    /// Resolves `source -> target` as of `as_of` (now when omitted).
    ///
    /// `Ok(None)` means no strategy produced a rate. Rate store and cache read
    /// failures are returned as errors; a failed cache write is logged and the
    /// computed result is still returned.
    pub async fn resolve(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Option<ConversionResult>, ResolveError> {
        let as_of = as_of.unwrap_or_else(Utc::now);

        if source == target {
            return Ok(Some(ConversionResult::identity(source, as_of)));
        }

        let lookup = Lookup {
            source,
            target,
            as_of,
        };

        for strategy in Strategy::CASCADE {
            if let Some(result) = strategy.apply(&lookup, self).await? {
                info!(
                    strategy = %strategy,
                    source = %source,
                    target = %target,
                    rate = %result.rate,
                    "Currency exchange rate resolved"
                );
                if strategy.caches_result() {
                    self.populate_cache(&lookup, &result).await;
                }
                return Ok(Some(result));
            }
        }

        debug!(source = %source, target = %target, as_of = %as_of, "No strategy resolved a rate");
        Ok(None)
    }

    async fn populate_cache(&self, lookup: &Lookup, result: &ConversionResult) {
        let key = lookup.cache_key();
        if let Err(e) = self.cache.set(&key, result, CACHE_TTL).await {
            warn!(key = %key, error = %e, "Failed to cache computed exchange rate");
        }
    }
}
