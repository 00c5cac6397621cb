//! Redirect resolution service with memoized link lookup.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::Memoizer;

/// The subset of a [`Link`] the redirect hot path needs.
///
/// Small on purpose: it is cloned out of the cache on every resolved visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub link_id: String,
    pub url: String,
    pub smart_engagement_counting: bool,
}

impl ResolvedLink {
    fn from_link(link: &Link) -> Self {
        Self {
            link_id: link.id.clone(),
            url: link.url.clone(),
            smart_engagement_counting: link.smart_engagement_counting,
        }
    }
}

/// Service resolving a visitor-supplied identifier to a redirect target.
///
/// Lookups are memoized per identifier with single-flight coalescing, so a
/// burst of visits to the same link reaches the store once per TTL. "Known
/// missing" is memoized too (as `None`), which keeps repeated lookups of dead
/// identifiers off the store; store failures are never memoized.
///
/// Entries may serve up to one TTL of staleness after a link changes unless
/// [`Self::evict`] is called for it.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    cache: Memoizer<String, Option<ResolvedLink>>,
}

impl<L: LinkRepository + ?Sized + 'static> RedirectService<L> {
    /// Creates a redirect service with the given cache bounds.
    pub fn new(repository: Arc<L>, cache_capacity: usize, cache_ttl: Duration) -> Self {
        Self {
            repository,
            cache: Memoizer::new(cache_capacity, cache_ttl),
        }
    }

    /// Resolves `identifier` (canonical id or short name) to its redirect
    /// target.
    ///
    /// A disabled link resolves exactly like a missing one; callers cannot tell
    /// the two apart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no enabled link matches.
    /// Returns [`AppError::Store`] if the lookup could not be performed; this is
    /// never downgraded to NotFound.
    pub async fn resolve_redirect(&self, identifier: &str) -> Result<ResolvedLink, AppError> {
        let repository = Arc::clone(&self.repository);
        let key = identifier.to_string();
        let lookup_key = key.clone();

        let resolved = self
            .cache
            .resolve(key, move || async move {
                let link = repository.find_by_id_or_short_name(&lookup_key).await?;
                Ok(link
                    .filter(|l| l.enabled)
                    .map(|l| ResolvedLink::from_link(&l)))
            })
            .await?;

        resolved.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "identifier": identifier }))
        })
    }

    /// Drops any cached entry for `link`, under both identifiers it is
    /// reachable by. Later visits observe the store's current state.
    pub fn evict(&self, link: &Link) {
        self.cache.remove(&link.id);
        if let Some(short_name) = &link.short_name {
            self.cache.remove(short_name);
        }
    }
}
