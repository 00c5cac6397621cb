//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Store interface for links.
///
/// The store is the single source of truth; every cache in front of it is an
/// optimization and must never change observable results.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by either its canonical id or its short name.
    ///
    /// Callers do not need to know which kind of identifier they hold; a single
    /// lookup checks both.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found (enabled or not)
    /// - `Ok(None)` if no link matches
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors — never NotFound, so
    /// callers can distinguish "does not exist" from "could not check".
    async fn find_by_id_or_short_name(&self, identifier: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links belonging to a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_workspace(&self, workspace_id: &str) -> Result<Vec<Link>, AppError>;

    /// Counts links belonging to a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count_by_workspace(&self, workspace_id: &str) -> Result<i64, AppError>;

    /// Partially updates a link by its canonical id.
    ///
    /// Only fields present in [`LinkPatch`] are modified. Returns the updated
    /// record so the caller can evict both its cache keys.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `link_id`.
    /// Returns [`AppError::Store`] on database errors.
    async fn update(&self, link_id: &str, patch: LinkPatch) -> Result<Link, AppError>;
}
