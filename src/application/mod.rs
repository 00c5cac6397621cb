//! Application layer orchestrating domain entities and store contracts.
//!
//! Services here hold the business rules; they depend on repository traits and
//! caches, never on axum or sqlx directly.

pub mod services;
