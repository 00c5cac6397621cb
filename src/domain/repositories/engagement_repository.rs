//! Repository trait for the engagement log.

use crate::domain::entities::{Engagement, EngagementEvent, NewEngagement};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A `(link id, counting engagements)` pair from the top-links ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEngagementCount {
    pub link_id: String,
    pub total_engagements: i64,
}

/// Store interface for engagement records.
///
/// Engagements are append-only facts: this service never updates or deletes
/// them, and windowed reads rely on their stable order by `created_at`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEngagementRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Appends one engagement record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors. The caller (the
    /// engagement worker) reports failures; they are never surfaced to the
    /// visitor being redirected.
    async fn append(&self, new_engagement: NewEngagement) -> Result<Engagement, AppError>;

    /// Counts engagements for a link with `created_at` in `[since, until]`.
    ///
    /// With `should_count_only`, deduplicated repeat visits are excluded —
    /// this is the variant behind every aggregate total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count_in_window(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        should_count_only: bool,
    ) -> Result<i64, AppError>;

    /// Lists raw `(timestamp, type)` rows for a link inside `[since, until]`,
    /// in `created_at` order. Includes non-counting rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn list_in_window(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<EngagementEvent>, AppError>;

    /// Ranks a workspace's links by counting engagements, descending.
    ///
    /// Ties are broken by store iteration order, which is not defined — callers
    /// must not rely on tie order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn top_links_by_engagement(
        &self,
        workspace_id: &str,
        limit: i64,
    ) -> Result<Vec<LinkEngagementCount>, AppError>;
}
