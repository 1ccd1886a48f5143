//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The resolution engine depends on these traits, not concrete implementations.

mod cache;
mod rate_store;

pub use cache::{CACHE_TTL, CacheStore};
pub use rate_store::RateStore;
