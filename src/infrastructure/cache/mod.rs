//! In-process caching primitives.
//!
//! - [`ttl_cache`] - Bounded TTL cache with lazy expiry
//! - [`memoizer`] - Single-flight memoization on top of the cache

pub mod memoizer;
pub mod ttl_cache;

pub use memoizer::Memoizer;
pub use ttl_cache::TtlCache;
