//! Deterministic cache keys for resolved rates.

use chrono::{DateTime, Utc};
use currencies::CurrencyCode;

/// Cache key of the form `SOURCE-TARGET-YYYY-MM`.
///
/// The as-of instant is truncated to its UTC year and month, so every
/// request for the same pair within a calendar month shares one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(source: CurrencyCode, target: CurrencyCode, as_of: DateTime<Utc>) -> Self {
        Self(format!("{}-{}-{}", source, target, as_of.format("%Y-%m")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
