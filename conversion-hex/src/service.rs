//! Conversion Application Service
//!
//! Validates inbound requests and drives the resolution engine.
//! Contains NO infrastructure logic - pure orchestration.

use chrono::Utc;

use conversion_types::{AppError, CacheStore, ConversionResult, ConvertQuery, RateStore};

use crate::engine::ResolutionEngine;
use crate::validation;

/// Application service for currency conversion.
///
/// Generic over the rate store and cache - adapters are injected at compile time.
pub struct ConversionService<R: RateStore, C: CacheStore> {
    engine: ResolutionEngine<R, C>,
}

impl<R: RateStore, C: CacheStore> ConversionService<R, C> {
    /// Creates a new conversion service around the given engine.
    pub fn new(engine: ResolutionEngine<R, C>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the underlying engine.
    pub fn engine(&self) -> &ResolutionEngine<R, C> {
        &self.engine
    }

    /// Validates `query` and resolves the requested rate.
    ///
    /// Validation failures are returned before the engine is consulted.
    /// An unresolvable pair is `AppError::NotFound`.
    #[tracing::instrument(skip(self), fields(source = ?query.source_currency, target = ?query.target_currency))]
    pub async fn convert(&self, query: &ConvertQuery) -> Result<ConversionResult, AppError> {
        let request = validation::validate(query, Utc::now())?;

        self.engine
            .resolve(request.source, request.target, request.as_of)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No exchange rate from {} to {}",
                    request.source, request.target
                ))
            })
    }
}
