//! # Conversion Repository
//!
//! Concrete adapters for the conversion service ports:
//! - `RateStore`: in-memory and SQLite (feature `sqlite`)
//! - `CacheStore`: in-memory with per-entry TTL

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conversion_types::{CurrencyCode, ExchangeRate, NewExchangeRate, RateStore, StoreError};

pub mod cache;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use cache::MemoryCache;
pub use memory::MemoryRateStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRateStore;

/// Rate store selected at runtime from a database URL.
pub enum Rates {
    Memory(MemoryRateStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteRateStore),
}

/// Build and initialize a rate store from a database URL.
///
/// - `memory://` - empty in-memory store
/// - `sqlite://...` - SQLite store, schema created on connect (feature `sqlite`)
///
/// # Examples
///
/// ```ignore
/// let rates = build_rates("sqlite://rates.db?mode=rwc").await?;
/// ```
pub async fn build_rates(database_url: &str) -> anyhow::Result<Rates> {
    if database_url.starts_with("memory:") {
        return Ok(Rates::Memory(MemoryRateStore::new()));
    }

    if database_url.starts_with("sqlite:") {
        return connect_sqlite(database_url).await;
    }

    anyhow::bail!("Unsupported DATABASE_URL scheme: {}", database_url)
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(database_url: &str) -> anyhow::Result<Rates> {
    Ok(Rates::Sqlite(SqliteRateStore::new(database_url).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(database_url: &str) -> anyhow::Result<Rates> {
    anyhow::bail!(
        "SQLite support requires the `sqlite` feature: {}",
        database_url
    )
}

impl Rates {
    /// Inserts a rate record.
    pub async fn insert_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate, StoreError> {
        match self {
            Rates::Memory(inner) => inner.insert(rate),
            #[cfg(feature = "sqlite")]
            Rates::Sqlite(inner) => inner.insert_rate(rate).await,
        }
    }

    /// Inserts several records, or none if any of them is invalid.
    pub async fn insert_rates(
        &self,
        rates: Vec<NewExchangeRate>,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        match self {
            Rates::Memory(inner) => inner.insert_rates(rates),
            #[cfg(feature = "sqlite")]
            Rates::Sqlite(inner) => inner.insert_rates(rates).await,
        }
    }
}

#[async_trait]
impl RateStore for Rates {
    async fn find_latest_rate(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        as_of: DateTime<Utc>,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        match self {
            Rates::Memory(inner) => inner.find_latest_rate(source, target, as_of).await,
            #[cfg(feature = "sqlite")]
            Rates::Sqlite(inner) => inner.find_latest_rate(source, target, as_of).await,
        }
    }
}
