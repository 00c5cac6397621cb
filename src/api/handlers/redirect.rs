//! Handler for the public short link redirect.

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::net::SocketAddr;
use tracing::warn;

use crate::api::cookies;
use crate::application::services::{VisitOrigin, tracing_cookie_name};
use crate::domain::entities::EngagementType;
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for the redirect endpoint.
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    /// Engagement channel hint (`CLICK`, `QR`); anything else is `UNKNOWN`.
    #[serde(rename = "type")]
    pub engagement_type: Option<String>,
}

/// Redirects an identifier to its destination URL, recording the visit.
///
/// # Endpoint
///
/// `GET /{identifier}?type=`
///
/// # Request Flow
///
/// 1. Resolve the identifier through the memoized resolver
/// 2. Check for the link's tracing cookie
/// 3. Record the engagement (fire-and-forget) and get the counting decision
/// 4. Return 307 Temporary Redirect, setting the tracing cookie for
///    smart-counting links
///
/// A 307 keeps clients re-requesting through this service, so every visit is
/// observed.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier doesn't resolve to an enabled link.
/// Returns 500 Internal Server Error if the store lookup fails.
pub async fn redirect_handler(
    Path(identifier): Path<String>,
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolved = state.redirect_service.resolve_redirect(&identifier).await?;

    let engagement_type = query
        .engagement_type
        .as_deref()
        .map(EngagementType::parse)
        .unwrap_or_default();

    let cookie_name = tracing_cookie_name(&resolved.link_id);
    let cookie_present = cookies::cookie_present(&headers, &cookie_name);

    let origin = VisitOrigin {
        referer: headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        ip: Some(addr.ip().to_string()),
    };

    let decision = state.engagement_service.record_engagement(
        &resolved,
        engagement_type,
        cookie_present,
        origin,
    );

    let mut response = Redirect::temporary(&resolved.url).into_response();
    if let Some(cookie) = decision.set_cookie {
        match HeaderValue::from_str(&cookies::set_cookie_header(&cookie)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(link_id = %resolved.link_id, error = %e, "invalid tracing cookie header"),
        }
    }

    Ok(response)
}
