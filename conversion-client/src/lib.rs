//! # Conversion Client SDK
//!
//! A typed Rust client for the Currency Conversion API.

use chrono::{DateTime, SecondsFormat, Utc};
use conversion_types::{ConversionResult, CurrencyCode, ValidationErrors};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const CONVERT_PATH: &str = "/api/currency-conversion/convert";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ValidationBody {
    fields: ValidationErrors,
}

/// Conversion API client.
pub struct ConversionClient {
    base_url: String,
    http: Client,
}

impl ConversionClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Gets the rate from `source` to `target` as of `date` (now when `None`).
    ///
    /// Returns `Ok(None)` when the server has no way to resolve the pair.
    pub async fn convert(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<ConversionResult>, ClientError> {
        let mut query = vec![
            ("sourceCurrency", source.code().to_string()),
            ("targetCurrency", target.code().to_string()),
        ];
        if let Some(date) = date {
            query.push(("date", date_param(date)));
        }

        let resp = self
            .http
            .get(format!("{}{}", self.base_url, CONVERT_PATH))
            .query(&query)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(resp).await.map(Some)
    }

    async fn handle_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<ConversionResult, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        if status == StatusCode::BAD_REQUEST {
            if let Ok(parsed) = serde_json::from_str::<ValidationBody>(&body) {
                return Err(ClientError::Validation(parsed.fields));
            }
        }

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// RFC 3339 in UTC, keeping any fractional seconds.
fn date_param(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
