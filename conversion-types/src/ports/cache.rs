//! Cache store port.

use std::time::Duration;

use crate::domain::{CacheKey, ConversionResult};
use crate::error::CacheError;

/// Time to live of every entry the engine writes.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Key/value store with per-entry expiry.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Returns the live entry for `key`. Expired entries are absent.
    async fn get(&self, key: &CacheKey) -> Result<Option<ConversionResult>, CacheError>;

    /// Stores `value` under `key`, replacing any existing entry.
    async fn set(
        &self,
        key: &CacheKey,
        value: &ConversionResult,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}
