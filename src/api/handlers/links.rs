//! Handler for link updates.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::{LinkResponse, UpdateLinkRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Partially updates a link and invalidates its cached resolution.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// After the store accepts the patch, both cache keys for the link are
/// evicted, so the change is visible to redirects immediately.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed URL or an empty patch.
/// Returns 404 Not Found if the id matches no link.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    request.validate().map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "errors": e.to_string() }))
    })?;

    let link = state.link_service.patch_link(&id, request.into()).await?;

    Ok(Json(link.into()))
}
