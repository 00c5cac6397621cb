//! Link entity representing a short link and its settings.

use chrono::{DateTime, Utc};

/// A short link owned by a workspace.
///
/// Resolvable by either its store-assigned `id` or its optional human-chosen
/// `short_name`; both identify the same record. Only `enabled` links resolve
/// to a redirect.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: String,
    pub short_name: Option<String>,
    pub title: Option<String>,
    pub url: String,
    pub workspace_id: String,
    pub enabled: bool,
    /// When set, repeat visits carrying a valid tracing cookie are recorded
    /// with `should_count = false`.
    pub smart_engagement_counting: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        short_name: Option<String>,
        title: Option<String>,
        url: String,
        workspace_id: String,
        enabled: bool,
        smart_engagement_counting: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_name,
            title,
            url,
            workspace_id,
            enabled,
            smart_engagement_counting,
            created_at,
            updated_at,
        }
    }
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. `title` distinguishes "leave as is"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub url: Option<String>,
    pub title: Option<Option<String>>,
    pub enabled: Option<bool>,
    pub smart_engagement_counting: Option<bool>,
}

impl LinkPatch {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.enabled.is_none()
            && self.smart_engagement_counting.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> Link {
        let now = Utc::now();
        Link::new(
            "a1b2c3".to_string(),
            Some("launch".to_string()),
            None,
            "https://example.com".to_string(),
            "ws_1".to_string(),
            true,
            false,
            now,
            now,
        )
    }

    #[test]
    fn test_link_creation() {
        let link = sample_link();
        assert_eq!(link.id, "a1b2c3");
        assert_eq!(link.short_name.as_deref(), Some("launch"));
        assert_eq!(link.url, "https://example.com");
        assert!(link.enabled);
        assert!(!link.smart_engagement_counting);
    }

    #[test]
    fn test_link_patch_is_empty() {
        assert!(LinkPatch::default().is_empty());

        let patch = LinkPatch {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
