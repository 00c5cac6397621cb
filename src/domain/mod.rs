//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store interface trait definitions
//! - [`engagement_worker`] - Asynchronous engagement append worker
//!
//! # Design Principles
//!
//! - The domain layer has no dependencies on infrastructure or transport
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business rules live in services (see [`crate::application::services`])
//!
//! # Engagement Flow
//!
//! 1. The redirect handler resolves the link and asks the recorder for a
//!    counting decision
//! 2. A [`entities::NewEngagement`] is sent to a bounded channel
//! 3. [`engagement_worker::run_engagement_worker`] appends it via
//!    [`repositories::EngagementRepository`], reporting failures

pub mod engagement_worker;
pub mod entities;
pub mod repositories;
