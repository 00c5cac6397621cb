//! Link mutation service with redirect cache invalidation.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::redirect_service::RedirectService;
use crate::domain::entities::{Link, LinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service applying partial link updates.
///
/// Mutation and invalidation are one operation here: after the store accepts a
/// patch, the redirect cache entries for the link are evicted synchronously, so
/// a disabled or retargeted link stops resolving stale before its TTL runs out.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    redirect_service: Arc<RedirectService<L>>,
}

impl<L: LinkRepository + ?Sized + 'static> LinkService<L> {
    pub fn new(repository: Arc<L>, redirect_service: Arc<RedirectService<L>>) -> Self {
        Self {
            repository,
            redirect_service,
        }
    }

    /// Applies `patch` to the link with canonical id `link_id` and returns the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch changes nothing.
    /// Returns [`AppError::NotFound`] if no link matches `link_id`.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn patch_link(&self, link_id: &str, patch: LinkPatch) -> Result<Link, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "No fields to update",
                json!({ "link_id": link_id }),
            ));
        }

        if let Some(url) = &patch.url {
            validate_destination(url)?;
        }

        let link = self.repository.update(link_id, patch).await?;
        self.redirect_service.evict(&link);
        Ok(link)
    }
}

/// Rejects destinations a browser could not be redirected to.
fn validate_destination(raw: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Destination must be an http(s) URL",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}
