//! Handler for workspace-level statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::WorkspaceStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns all-time aggregates for a workspace's links.
///
/// # Endpoint
///
/// `GET /api/workspaces/{workspace_id}/stats`
///
/// An unknown workspace reports zeros rather than 404: workspace existence is
/// established upstream of this service.
pub async fn workspace_stats_handler(
    Path(workspace_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WorkspaceStatsResponse>, AppError> {
    let stats = state.stats_service.get_workspace_stats(&workspace_id).await?;
    Ok(Json(WorkspaceStatsResponse::new(&workspace_id, stats)))
}
