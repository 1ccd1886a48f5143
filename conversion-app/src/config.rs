//! Configuration loading from environment.

use std::env;

use conversion_types::AnchorCurrencies;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub anchors: AnchorCurrencies,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let anchors = match var("ANCHOR_CURRENCIES") {
            Some(list) => list
                .parse()
                .map_err(|e| anyhow::anyhow!("ANCHOR_CURRENCIES: {}", e))?,
            None => AnchorCurrencies::default(),
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            port,
            database_url,
            anchors,
            log_format,
        })
    }
}
