//! Domain models for the conversion service.

pub mod anchors;
pub mod cache_key;
pub mod conversion;
pub mod rate;

pub use anchors::AnchorCurrencies;
pub use cache_key::CacheKey;
pub use conversion::ConversionResult;
pub use rate::{ExchangeRate, RATE_PRECISION, RateId, divide_rates, round_rate};
