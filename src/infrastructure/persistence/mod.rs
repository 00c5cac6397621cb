//! PostgreSQL repository implementations.
//!
//! Each repository wraps a shared [`sqlx::PgPool`] and implements a domain
//! repository trait with runtime-checked queries.

pub mod pg_engagement_repository;
pub mod pg_link_repository;

pub use pg_engagement_repository::PgEngagementRepository;
pub use pg_link_repository::PgLinkRepository;
