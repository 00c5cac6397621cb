//! Engagement recording with smart repeat-visit counting.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::error;

use crate::application::services::redirect_service::ResolvedLink;
use crate::domain::entities::{EngagementType, NewEngagement};

/// Request context the redirect handler extracts for attribution.
#[derive(Debug, Clone, Default)]
pub struct VisitOrigin {
    pub referer: Option<String>,
    pub ip: Option<String>,
}

/// A `Set-Cookie` directive the transport layer turns into a header.
///
/// The core never touches HTTP headers itself; this is the whole contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingCookie {
    pub name: String,
    pub value: String,
    pub max_age: Duration,
}

/// Outcome of recording a visit.
#[derive(Debug, Clone)]
pub struct EngagementDecision {
    /// Whether this visit contributes to aggregate totals.
    pub should_count: bool,
    /// Cookie to issue, present whenever the link uses smart counting.
    pub set_cookie: Option<TracingCookie>,
}

/// Name of the tracing cookie marking a browser as already counted for a link.
pub fn tracing_cookie_name(link_id: &str) -> String {
    format!("lp_seen_{link_id}")
}

/// Service deciding how a visit is counted and queueing the record.
///
/// With smart counting enabled on a link, a visit carrying the link's tracing
/// cookie is recorded with `should_count = false`; the raw log keeps every
/// visit either way. The cookie is (re)issued on every smart-counted visit so
/// its expiry slides forward.
///
/// The append itself is fire-and-forget over a bounded queue: recording never
/// blocks or fails the redirect, at worst an event is dropped and logged.
pub struct EngagementService {
    queue: mpsc::Sender<NewEngagement>,
    cookie_max_age: Duration,
}

impl EngagementService {
    pub fn new(queue: mpsc::Sender<NewEngagement>, cookie_max_age: Duration) -> Self {
        Self {
            queue,
            cookie_max_age,
        }
    }

    /// Records a visit to `link` and returns the counting decision.
    ///
    /// Infallible by design: queue overflow is logged and the visit is dropped
    /// from analytics, while the decision (and its cookie directive) still
    /// reaches the caller.
    pub fn record_engagement(
        &self,
        link: &ResolvedLink,
        engagement_type: EngagementType,
        tracing_cookie_present: bool,
        origin: VisitOrigin,
    ) -> EngagementDecision {
        let should_count = !(link.smart_engagement_counting && tracing_cookie_present);

        let event = NewEngagement {
            link_id: link.link_id.clone(),
            engagement_type,
            referer: origin.referer,
            ip: origin.ip,
            should_count,
            created_at: Utc::now(),
        };
        if let Err(e) = self.queue.try_send(event) {
            error!(link_id = %link.link_id, error = %e, "engagement queue full, dropping event");
        }

        let set_cookie = link.smart_engagement_counting.then(|| TracingCookie {
            name: tracing_cookie_name(&link.link_id),
            value: Utc::now().timestamp().to_string(),
            max_age: self.cookie_max_age,
        });

        EngagementDecision {
            should_count,
            set_cookie,
        }
    }
}
