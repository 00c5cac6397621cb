//! Infrastructure layer with concrete cache and persistence implementations.
//!
//! # Architecture
//!
//! - [`cache`] - In-process TTL cache and single-flight memoizer
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
