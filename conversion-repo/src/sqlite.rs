//! SQLite rate store adapter.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use conversion_types::{CurrencyCode, ExchangeRate, NewExchangeRate, RateStore, StoreError};

use crate::types::{DbExchangeRate, encode_instant};

const SCHEMA: &str = include_str!("../migrations/0001_create_exchange_rates.sql");

/// SQLite rate store.
pub struct SqliteRateStore {
    pool: SqlitePool,
}

impl SqliteRateStore {
    /// Connects and creates the schema if missing.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives only as long as its connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `exchange_rates` table and index if missing.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// Inserts a rate record, replacing any record for the same pair and
    /// effective start date.
    pub async fn insert_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate, StoreError> {
        let record = ExchangeRate::new(
            rate.source_currency,
            rate.target_currency,
            rate.rate,
            rate.effective_start_date,
        )?;

        upsert(&record)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(
            source = %record.source_currency,
            target = %record.target_currency,
            rate = %record.rate,
            "Rate inserted"
        );
        Ok(record)
    }

    /// Inserts several records in one transaction, or none if any of them
    /// is invalid.
    pub async fn insert_rates(
        &self,
        rates: Vec<NewExchangeRate>,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
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

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for record in &records {
            upsert(record)
                .execute(&mut *db_tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        db_tx
            .commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(count = records.len(), "Rates inserted");
        Ok(records)
    }
}

fn upsert(record: &ExchangeRate) -> Query<'static, Sqlite, SqliteArguments<'static>> {
    sqlx::query(
        r#"INSERT INTO exchange_rates (id, source_currency, target_currency, rate, effective_start_date)
           VALUES (?, ?, ?, ?, ?)
           ON CONFLICT (source_currency, target_currency, effective_start_date)
           DO UPDATE SET id = excluded.id, rate = excluded.rate"#,
    )
    .bind(record.id.to_string())
    .bind(record.source_currency.code())
    .bind(record.target_currency.code())
    .bind(record.rate.to_string())
    .bind(encode_instant(record.effective_start_date))
}

#[async_trait]
impl RateStore for SqliteRateStore {
    async fn find_latest_rate(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        as_of: DateTime<Utc>,
    ) -> Result<Option<ExchangeRate>, StoreError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, source_currency, target_currency, rate, effective_start_date
               FROM exchange_rates
               WHERE source_currency = ? AND target_currency = ? AND effective_start_date <= ?
               ORDER BY effective_start_date DESC
               LIMIT 1"#,
        )
        .bind(source.code())
        .bind(target.code())
        .bind(encode_instant(as_of))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbExchangeRate::into_domain).transpose()
    }
}
