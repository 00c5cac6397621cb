//! DTOs for the workspace statistics endpoint.

use serde::Serialize;

use crate::application::services::WorkspaceStats;

/// One entry in the workspace top-links ranking.
#[derive(Debug, Serialize)]
pub struct TopLinkEntry {
    pub link_id: String,
    pub total_engagements: i64,
}

/// Response body for `GET /api/workspaces/{workspace_id}/stats`.
#[derive(Debug, Serialize)]
pub struct WorkspaceStatsResponse {
    pub workspace_id: String,
    pub link_count: i64,
    pub total_engagements: i64,
    pub total_engagements_last_week: i64,
    pub top_links: Vec<TopLinkEntry>,
}

impl WorkspaceStatsResponse {
    pub fn new(workspace_id: &str, stats: WorkspaceStats) -> Self {
        Self {
            workspace_id: workspace_id.to_string(),
            link_count: stats.link_count,
            total_engagements: stats.total_engagements,
            total_engagements_last_week: stats.total_engagements_last_week,
            top_links: stats
                .top_links
                .into_iter()
                .map(|t| TopLinkEntry {
                    link_id: t.link_id,
                    total_engagements: t.total_engagements,
                })
                .collect(),
        }
    }
}
