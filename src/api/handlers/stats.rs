//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};

use crate::api::dto::{LinkStatsQuery, LinkStatsResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::time_range::{
    TimeRangeError, fulfill_time_range, parse_instant, validate_time_range,
};

/// Returns windowed engagement statistics for one link.
///
/// # Endpoint
///
/// `GET /api/links/{identifier}/stats?since&until`
///
/// Missing bounds are inferred from the configured maximum window; the
/// resolved window is echoed back so clients know what they actually got.
///
/// # Errors
///
/// Returns 400 Bad Request for unparseable bounds, an inverted window, or a
/// window wider than the configured maximum.
/// Returns 404 Not Found if the identifier matches no link.
pub async fn link_stats_handler(
    Path(identifier): Path<String>,
    Query(query): Query<LinkStatsQuery>,
    State(state): State<AppState>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let since = parse_bound(query.since.as_deref())?;
    let until = parse_bound(query.until.as_deref())?;

    let window = fulfill_time_range(since, until, state.stats_max_window);
    let window = validate_time_range(window.since, window.until, state.stats_max_window)?;

    let stats = state.stats_service.get_link_stats(&identifier, window).await?;

    Ok(Json(LinkStatsResponse::new(stats, &window)))
}

fn parse_bound(value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match value {
        None => Ok(None),
        Some(v) => parse_instant(v)
            .map(Some)
            .ok_or_else(|| AppError::from(TimeRangeError::InvalidBounds)),
    }
}
