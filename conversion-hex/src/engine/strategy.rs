//! The five resolution strategies.
//!
//! Each strategy reads from the engine's collaborators and either produces a
//! result or passes. None of them write; cache population is done by the
//! engine for the strategies that ask for it.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use conversion_types::domain::divide_rates;
use conversion_types::{
    CacheStore, ConversionResult, CurrencyCode, ExchangeRate, RateStore, ResolveError, StoreError,
};

use super::{Lookup, ResolutionEngine};

/// A step of the resolution cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Stored `source -> target` rate.
    Direct,
    /// Reciprocal of the stored `target -> source` rate.
    Inverse,
    /// Previously computed triangular or base result.
    CacheHit,
    /// `rate(source -> anchor) * rate(anchor -> target)`.
    Triangular,
    /// `rate(anchor -> target) / rate(anchor -> source)`.
    Base,
}

impl Strategy {
    /// Evaluation order. The first strategy to produce a result wins.
    pub const CASCADE: [Strategy; 5] = [
        Strategy::Direct,
        Strategy::Inverse,
        Strategy::CacheHit,
        Strategy::Triangular,
        Strategy::Base,
    ];

    /// Whether a result produced by this strategy is written to the cache.
    pub fn caches_result(self) -> bool {
        matches!(self, Strategy::Triangular | Strategy::Base)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Inverse => "inverse",
            Strategy::CacheHit => "cache",
            Strategy::Triangular => "triangular",
            Strategy::Base => "base",
        }
    }

    pub(crate) async fn apply<R: RateStore, C: CacheStore>(
        self,
        lookup: &Lookup,
        engine: &ResolutionEngine<R, C>,
    ) -> Result<Option<ConversionResult>, ResolveError> {
        match self {
            Strategy::Direct => Ok(direct(lookup, &engine.rates).await?),
            Strategy::Inverse => Ok(inverse(lookup, &engine.rates).await?),
            Strategy::CacheHit => Ok(cache_hit(lookup, &engine.cache).await?),
            Strategy::Triangular => Ok(triangular(lookup, engine).await?),
            Strategy::Base => Ok(base(lookup, engine).await?),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

async fn direct<R: RateStore>(
    lookup: &Lookup,
    rates: &R,
) -> Result<Option<ConversionResult>, StoreError> {
    let found = rates
        .find_latest_rate(lookup.source, lookup.target, lookup.as_of)
        .await?;

    Ok(found.map(|rate| {
        debug!(source = %lookup.source, target = %lookup.target, "Exchange rate found in rate store");
        ConversionResult::new(
            lookup.source,
            lookup.target,
            rate.rate,
            rate.effective_start_date,
        )
    }))
}

async fn inverse<R: RateStore>(
    lookup: &Lookup,
    rates: &R,
) -> Result<Option<ConversionResult>, StoreError> {
    let Some(found) = rates
        .find_latest_rate(lookup.target, lookup.source, lookup.as_of)
        .await?
    else {
        return Ok(None);
    };

    match divide_rates(Decimal::ONE, found.rate) {
        Some(rate) => {
            debug!(
                source = %lookup.target,
                target = %lookup.source,
                "Exchange rate calculated with inverse rate"
            );
            Ok(Some(ConversionResult::new(
                lookup.source,
                lookup.target,
                rate,
                found.effective_start_date,
            )))
        }
        None => {
            warn!(id = %found.id, rate = %found.rate, "Stored rate cannot be inverted");
            Ok(None)
        }
    }
}

async fn cache_hit<C: CacheStore>(
    lookup: &Lookup,
    cache: &C,
) -> Result<Option<ConversionResult>, conversion_types::CacheError> {
    let key = lookup.cache_key();
    let cached = cache.get(&key).await?;
    if cached.is_some() {
        debug!(key = %key, as_of = %lookup.as_of, "Exchange rate found in cache");
    }
    Ok(cached)
}

async fn triangular<R: RateStore, C: CacheStore>(
    lookup: &Lookup,
    engine: &ResolutionEngine<R, C>,
) -> Result<Option<ConversionResult>, StoreError> {
    let found = first_anchor_match(
        lookup,
        engine,
        |anchor| ((lookup.source, anchor), (anchor, lookup.target)),
        |to_anchor, from_anchor| to_anchor.rate.checked_mul(from_anchor.rate),
    )
    .await?;

    Ok(found.map(|(anchor, rate)| {
        debug!(anchor = %anchor, "Exchange rate calculated with triangular conversion");
        ConversionResult::new(lookup.source, lookup.target, rate, lookup.as_of)
    }))
}

async fn base<R: RateStore, C: CacheStore>(
    lookup: &Lookup,
    engine: &ResolutionEngine<R, C>,
) -> Result<Option<ConversionResult>, StoreError> {
    let found = first_anchor_match(
        lookup,
        engine,
        |anchor| ((anchor, lookup.source), (anchor, lookup.target)),
        |anchor_to_source, anchor_to_target| {
            divide_rates(anchor_to_target.rate, anchor_to_source.rate)
        },
    )
    .await?;

    Ok(found.map(|(anchor, rate)| {
        debug!(anchor = %anchor, "Exchange rate calculated with base conversion");
        ConversionResult::new(lookup.source, lookup.target, rate, lookup.as_of)
    }))
}

type Leg = (CurrencyCode, CurrencyCode);

/// Ordered, first-match, two-legged join over the anchor list.
///
/// Anchors are tried strictly in order. Both legs of one anchor are fetched
/// concurrently and both are awaited before the anchor is judged; the search
/// stops at the first anchor whose legs both resolve and combine. A store
/// failure on either leg aborts the search and drops the other leg.
async fn first_anchor_match<R, C, L, F>(
    lookup: &Lookup,
    engine: &ResolutionEngine<R, C>,
    legs: L,
    combine: F,
) -> Result<Option<(CurrencyCode, Decimal)>, StoreError>
where
    R: RateStore,
    C: CacheStore,
    L: Fn(CurrencyCode) -> (Leg, Leg),
    F: Fn(&ExchangeRate, &ExchangeRate) -> Option<Decimal>,
{
    for anchor in engine.anchors.iter() {
        let ((first_from, first_to), (second_from, second_to)) = legs(anchor);

        let (first, second) = tokio::try_join!(
            engine
                .rates
                .find_latest_rate(first_from, first_to, lookup.as_of),
            engine
                .rates
                .find_latest_rate(second_from, second_to, lookup.as_of),
        )?;

        if let (Some(first), Some(second)) = (first, second) {
            match combine(&first, &second) {
                Some(rate) => return Ok(Some((anchor, rate))),
                None => {
                    warn!(
                        anchor = %anchor,
                        first = %first.rate,
                        second = %second.rate,
                        "Anchor legs cannot be combined"
                    );
                }
            }
        }
    }

    Ok(None)
}
