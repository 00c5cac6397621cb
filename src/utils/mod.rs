//! Pure helper modules used across the application:
//!
//! - [`time_range`] - Statistics window resolution and validation
//! - [`rate_key`] - Rate-limit bucket key derivation

pub mod rate_key;
pub mod time_range;
