//! # Conversion Types
//!
//! Domain types and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! rate arithmetic, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (ExchangeRate, ConversionResult, AnchorCurrencies, CacheKey)
//! - `ports/` - Trait definitions that adapters must implement (RateStore, CacheStore)
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation, collaborator and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currencies::CurrencyCode;
pub use domain::{
    AnchorCurrencies, CacheKey, ConversionResult, ExchangeRate, RATE_PRECISION, RateId,
};
pub use dto::*;
pub use error::{AppError, CacheError, DomainError, ResolveError, StoreError, ValidationErrors};
pub use ports::{CACHE_TTL, CacheStore, RateStore};
