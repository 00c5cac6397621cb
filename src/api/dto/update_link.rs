//! DTOs for the link update endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch};

/// Request body for `PATCH /api/links/{id}`.
///
/// All fields are optional — only provided fields are changed.
///
/// # `title` semantics
///
/// - **Absent** (`title` not in JSON) → leave existing value unchanged
/// - **`null`** → clear the title
/// - **String** → set new title
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    /// Display title. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub title: Option<Option<String>>,

    /// Toggle whether the link resolves at all.
    pub enabled: Option<bool>,

    /// Toggle cookie-based repeat-visit deduplication.
    pub smart_engagement_counting: Option<bool>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(request: UpdateLinkRequest) -> Self {
        LinkPatch {
            url: request.url,
            title: request.title,
            enabled: request.enabled,
            smart_engagement_counting: request.smart_engagement_counting,
        }
    }
}

/// Response body carrying the updated link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub short_name: Option<String>,
    pub title: Option<String>,
    pub url: String,
    pub workspace_id: String,
    pub enabled: bool,
    pub smart_engagement_counting: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_name: link.short_name,
            title: link.title,
            url: link.url,
            workspace_id: link.workspace_id,
            enabled: link.enabled,
            smart_engagement_counting: link.smart_engagement_counting,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
