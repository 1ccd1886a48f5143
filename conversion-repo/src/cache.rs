//! In-memory cache adapter with per-entry TTL.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use conversion_types::{CacheError, CacheKey, CacheStore, ConversionResult};

/// Cached result entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: ConversionResult,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe cache with per-entry TTL.
///
/// Expired entries read as absent and are removed on access. When the cache
/// is full, expired entries are purged first, then the entry closest to
/// expiry is evicted.
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.is_live(now));
    }

    fn make_room(&self) {
        self.purge_expired();
        if self.entries.len() < self.max_entries {
            return;
        }
        let soonest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().expires_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = soonest {
            self.entries.remove(&key);
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<ConversionResult>, CacheError> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key.as_str()) {
            if entry.is_live(now) {
                return Ok(Some(entry.value.clone()));
            }
            debug!(key = %key, "Cache entry expired");
            drop(entry);
            self.entries
                .remove_if(key.as_str(), |_, entry| !entry.is_live(now));
        }

        Ok(None)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: &ConversionResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if !self.entries.contains_key(key.as_str()) && self.entries.len() >= self.max_entries {
            self.make_room();
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use conversion_types::{CACHE_TTL, CurrencyCode};
    use rust_decimal_macros::dec;

    fn key(target: CurrencyCode) -> CacheKey {
        CacheKey::new(
            CurrencyCode::EUR,
            target,
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        )
    }

    fn result(target: CurrencyCode) -> ConversionResult {
        ConversionResult::new(
            CurrencyCode::EUR,
            target,
            dec!(1.0625),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_live_until_ttl() {
        let cache = MemoryCache::new();
        cache
            .set(&key(CurrencyCode::USD), &result(CurrencyCode::USD), CACHE_TTL)
            .await
            .unwrap();

        tokio::time::advance(CACHE_TTL - Duration::from_secs(1)).await;
        let hit = cache.get(&key(CurrencyCode::USD)).await.unwrap();
        assert_eq!(hit, Some(result(CurrencyCode::USD)));

        tokio::time::advance(Duration::from_secs(1)).await;
        let miss = cache.get(&key(CurrencyCode::USD)).await.unwrap();
        assert_eq!(miss, None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(10);
        cache
            .set(&key(CurrencyCode::USD), &result(CurrencyCode::USD), ttl)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        cache
            .set(&key(CurrencyCode::USD), &result(CurrencyCode::USD), ttl)
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;

        assert!(cache.get(&key(CurrencyCode::USD)).await.unwrap().is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_cache_evicts_soonest_expiry() {
        let cache = MemoryCache::with_capacity(2);
        cache
            .set(&key(CurrencyCode::USD), &result(CurrencyCode::USD), Duration::from_secs(10))
            .await
            .unwrap();
        cache
            .set(&key(CurrencyCode::GBP), &result(CurrencyCode::GBP), Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set(&key(CurrencyCode::JPY), &result(CurrencyCode::JPY), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(CurrencyCode::USD)).await.unwrap().is_none());
        assert!(cache.get(&key(CurrencyCode::GBP)).await.unwrap().is_some());
        assert!(cache.get(&key(CurrencyCode::JPY)).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = MemoryCache::new();
        cache
            .set(&key(CurrencyCode::USD), &result(CurrencyCode::USD), Duration::from_secs(1))
            .await
            .unwrap();
        cache
            .set(&key(CurrencyCode::GBP), &result(CurrencyCode::GBP), CACHE_TTL)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.purge_expired();

        assert_eq!(cache.len(), 1);
    }
}
