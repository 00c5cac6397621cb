//! Tracing cookie access at the HTTP boundary.
//!
//! The services only decide *whether* a cookie exists and *what* to issue; the
//! raw `Cookie` / `Set-Cookie` header handling lives here.

use axum::http::{HeaderMap, header};

use crate::application::services::TracingCookie;

/// Returns true when a cookie named `name` is present on the request.
///
/// The value is irrelevant: presence alone marks the browser as already
/// counted. Malformed cookie pairs are skipped.
pub fn cookie_present(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(cookie_name, _)| cookie_name == name)
}

/// Renders a [`TracingCookie`] as a `Set-Cookie` header value.
///
/// `SameSite=Lax` keeps the cookie on top-level navigations (the redirect
/// itself) without exposing it to cross-site subrequests.
pub fn set_cookie_header(cookie: &TracingCookie) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax",
        cookie.name,
        cookie.value,
        cookie.max_age.as_secs()
    )
}
