//! # Conversion Hex
//!
//! Application layer and HTTP adapter for the currency conversion service.
//!
//! ## Architecture
//!
//! - `validation` - Request validation (runs before any resolution)
//! - `engine/` - Resolution engine: the ordered strategy cascade
//! - `service` - Application service (validate, then resolve)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The engine is generic over `R: RateStore` and `C: CacheStore`, allowing
//! different adapters to be injected.

pub mod engine;
pub mod inbound;
pub mod service;
pub mod validation;

#[cfg(test)]
mod service_tests;

pub use engine::{Lookup, ResolutionEngine, Strategy};
pub use service::ConversionService;
pub use validation::{ConversionRequest, validate};
