//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{identifier}` - Short link redirect (public)
//! - `GET /health`       - Health check (public)
//! - `/api/*`            - Statistics and link management
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-admission-key token bucket
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes().layer(rate_limit::api_layer(behind_proxy));

    let public = Router::new()
        .route("/{identifier}", get(redirect_handler))
        .layer(rate_limit::layer(behind_proxy));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
