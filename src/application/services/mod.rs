//! Application services implementing the core use cases.
//!
//! # Available Services
//!
//! - [`redirect_service`] - Identifier resolution with memoized lookups
//! - [`engagement_service`] - Visit recording and smart counting decisions
//! - [`stats_service`] - Per-link and per-workspace statistics
//! - [`link_service`] - Link patching with cache invalidation

pub mod engagement_service;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;

pub use engagement_service::{
    EngagementDecision, EngagementService, TracingCookie, VisitOrigin, tracing_cookie_name,
};
pub use link_service::LinkService;
pub use redirect_service::{RedirectService, ResolvedLink};
pub use stats_service::{LinkStats, StatsService, WorkspaceStats};
