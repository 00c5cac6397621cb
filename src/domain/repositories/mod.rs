//! Repository trait definitions for the domain layer.
//!
//! These traits are the store interfaces the core consumes; the core never
//! implements storage itself. Concrete implementations live in
//! `crate::infrastructure::persistence`, and mockall generates test doubles.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link lookup and mutation
//! - [`EngagementRepository`] - Append-only engagement log and aggregations

pub mod engagement_repository;
pub mod link_repository;

pub use engagement_repository::{EngagementRepository, LinkEngagementCount};
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
