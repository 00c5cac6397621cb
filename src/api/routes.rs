//! API route configuration.

use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::handlers::{link_stats_handler, update_link_handler, workspace_stats_handler};
use crate::state::AppState;

/// Statistics and management routes mounted under `/api`.
///
/// # Endpoints
///
/// - `GET   /links/{identifier}/stats`      - Windowed per-link statistics
/// - `PATCH /links/{id}`                    - Partial link update + cache eviction
/// - `GET   /workspaces/{workspace_id}/stats` - Workspace aggregates
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links/{identifier}/stats", get(link_stats_handler))
        .route("/links/{id}", patch(update_link_handler))
        .route("/workspaces/{workspace_id}/stats", get(workspace_stats_handler))
}
