//! Rate limiting middleware using token bucket algorithm.

use axum::extract::ConnectInfo;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, errors::GovernorError, governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
};

use crate::utils::rate_key::derive_key;

/// Extracts the admission key (hashed client IP) for rate limiting.
///
/// With `behind_proxy`, the client IP is read from `X-Forwarded-For` /
/// `X-Real-IP` before falling back to the peer socket address. Never enable it
/// for directly exposed deployments: those headers are client-controlled.
#[derive(Debug, Clone)]
pub struct AdmissionKeyExtractor {
    behind_proxy: bool,
}

impl AdmissionKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }

    fn forwarded_ip<T>(req: &axum::http::Request<T>) -> Option<IpAddr> {
        let headers = req.headers();
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse().ok())
            })
    }

    fn peer_ip<T>(req: &axum::http::Request<T>) -> Option<IpAddr> {
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    }
}

impl KeyExtractor for AdmissionKeyExtractor {
    type Key = String;

    fn extract<T>(&self, req: &axum::http::Request<T>) -> Result<Self::Key, GovernorError> {
        let ip = if self.behind_proxy {
            Self::forwarded_ip(req).or_else(|| Self::peer_ip(req))
        } else {
            Self::peer_ip(req)
        };

        ip.map(derive_key).ok_or(GovernorError::UnableToExtractKey)
    }
}

type RateLimitLayer =
    GovernorLayer<AdmissionKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the public redirect endpoint.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Limits are
/// applied per admission key, a hash of the client IP.
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .key_extractor(AdmissionKeyExtractor::new(behind_proxy))
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a stricter rate limiter for the statistics and management API.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 30 requests
pub fn api_layer(behind_proxy: bool) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(30)
            .key_extractor(AdmissionKeyExtractor::new(behind_proxy))
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
