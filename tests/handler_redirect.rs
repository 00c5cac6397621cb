mod common;

use axum_test::TestServer;
use linkpulse::domain::entities::EngagementType;
use serde_json::json;

use common::{create_test_context, test_link, test_router};

fn smart_link(id: &str, short_name: Option<&str>, url: &str) -> linkpulse::domain::entities::Link {
    let mut link = test_link(id, short_name, url);
    link.smart_engagement_counting = true;
    link
}

#[tokio::test]
async fn test_redirect_success() {
    let ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com/target",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/launch").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_by_canonical_id() {
    let ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com/target",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/a1b2c3").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = create_test_context(vec![]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/missing").await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["details"]["identifier"], "missing");
}

#[tokio::test]
async fn test_disabled_link_is_not_found() {
    let mut link = test_link("a1b2c3", Some("launch"), "https://example.com");
    link.enabled = false;

    let ctx = create_test_context(vec![link]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/launch").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_queues_engagement_with_type() {
    let mut ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    server.get("/launch").add_query_param("type", "QR").await;

    let event = ctx.engagement_rx.try_recv().unwrap();
    assert_eq!(event.link_id, "a1b2c3");
    assert_eq!(event.engagement_type, EngagementType::Qr);
    assert!(event.should_count);
    assert_eq!(event.ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_unrecognized_type_falls_back_to_unknown() {
    let mut ctx = create_test_context(vec![test_link("a1b2c3", None, "https://example.com")]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    server.get("/a1b2c3").add_query_param("type", "TAP").await;

    let event = ctx.engagement_rx.try_recv().unwrap();
    assert_eq!(event.engagement_type, EngagementType::Unknown);
}

#[tokio::test]
async fn test_smart_link_sets_tracing_cookie() {
    let ctx = create_test_context(vec![smart_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/launch").await;

    assert_eq!(response.status_code(), 307);
    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("lp_seen_a1b2c3="));
    assert!(set_cookie.contains("Max-Age=2592000"));
    assert!(set_cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_plain_link_sets_no_cookie() {
    let ctx = create_test_context(vec![test_link("a1b2c3", None, "https://example.com")]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server.get("/a1b2c3").await;

    assert_eq!(response.status_code(), 307);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn test_repeat_visit_with_cookie_is_recorded_as_non_counting() {
    let mut ctx = create_test_context(vec![smart_link("a1b2c3", None, "https://example.com")]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server
        .get("/a1b2c3")
        .add_header("cookie", "lp_seen_a1b2c3=1714000000")
        .await;

    // Still a redirect, still a cookie refresh, but the event doesn't count.
    assert_eq!(response.status_code(), 307);
    assert!(response.headers().get("set-cookie").is_some());

    let event = ctx.engagement_rx.try_recv().unwrap();
    assert!(!event.should_count);
}

#[tokio::test]
async fn test_cookie_for_another_link_does_not_deduplicate() {
    let mut ctx = create_test_context(vec![smart_link("a1b2c3", None, "https://example.com")]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    server
        .get("/a1b2c3")
        .add_header("cookie", "lp_seen_zzz=1714000000")
        .await;

    let event = ctx.engagement_rx.try_recv().unwrap();
    assert!(event.should_count);
}

#[tokio::test]
async fn test_cached_resolution_survives_store_change_until_eviction() {
    let ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com/old",
    )]);
    let links = std::sync::Arc::clone(&ctx.links);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let first = server.get("/launch").await;
    assert_eq!(first.header("location"), "https://example.com/old");

    // Change the store behind the cache; within the TTL the old target is
    // intentionally still served.
    links.replace(test_link("a1b2c3", Some("launch"), "https://example.com/new"));

    let second = server.get("/launch").await;
    assert_eq!(second.header("location"), "https://example.com/old");
}

#[tokio::test]
async fn test_patch_invalidates_cached_resolution() {
    let ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com/old",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let first = server.get("/launch").await;
    assert_eq!(first.header("location"), "https://example.com/old");

    let patch = server
        .patch("/api/links/a1b2c3")
        .json(&json!({ "url": "https://example.com/new" }))
        .await;
    assert_eq!(patch.status_code(), 200);

    let second = server.get("/launch").await;
    assert_eq!(second.header("location"), "https://example.com/new");
}

#[tokio::test]
async fn test_patch_disabling_link_stops_redirects_immediately() {
    let ctx = create_test_context(vec![test_link(
        "a1b2c3",
        Some("launch"),
        "https://example.com",
    )]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    assert_eq!(server.get("/launch").await.status_code(), 307);

    let patch = server
        .patch("/api/links/a1b2c3")
        .json(&json!({ "enabled": false }))
        .await;
    assert_eq!(patch.status_code(), 200);

    assert_eq!(server.get("/launch").await.status_code(), 404);
}

#[tokio::test]
async fn test_patch_rejects_malformed_url() {
    let ctx = create_test_context(vec![test_link("a1b2c3", None, "https://example.com")]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server
        .patch("/api/links/a1b2c3")
        .json(&json!({ "url": "not a url" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_patch_unknown_link_is_not_found() {
    let ctx = create_test_context(vec![]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server
        .patch("/api/links/ghost")
        .json(&json!({ "enabled": false }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_patch_clears_title_with_null() {
    let ctx = create_test_context(vec![{
        let mut link = test_link("a1b2c3", None, "https://example.com");
        link.title = Some("Launch page".to_string());
        link
    }]);
    let server = TestServer::new(test_router(ctx.state)).unwrap();

    let response = server
        .patch("/api/links/a1b2c3")
        .json(&json!({ "title": null }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], serde_json::Value::Null);
}
