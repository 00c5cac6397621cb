//! Engagement entities: the append-only visit log behind link statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a visitor reached the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementType {
    #[serde(rename = "CLICK")]
    Click,
    #[serde(rename = "QR")]
    Qr,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl EngagementType {
    /// Storage representation, shared with the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementType::Click => "CLICK",
            EngagementType::Qr => "QR",
            EngagementType::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "CLICK" => EngagementType::Click,
            "QR" => EngagementType::Qr,
            _ => EngagementType::Unknown,
        }
    }
}

impl Default for EngagementType {
    fn default() -> Self {
        EngagementType::Unknown
    }
}

/// A persisted engagement record. Never updated or deleted by this service.
#[derive(Debug, Clone)]
pub struct Engagement {
    pub id: i64,
    pub link_id: String,
    pub engagement_type: EngagementType,
    pub referer: Option<String>,
    pub ip: Option<String>,
    /// False for deduplicated repeat visits under smart counting; such rows
    /// are excluded from aggregate totals but kept in the raw log.
    pub should_count: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an engagement record.
///
/// Also the payload carried over the append queue from the redirect path to
/// [`crate::domain::engagement_worker::run_engagement_worker`]; `created_at` is
/// captured when the visit is recorded, not when the worker drains it.
#[derive(Debug, Clone)]
pub struct NewEngagement {
    pub link_id: String,
    pub engagement_type: EngagementType,
    pub referer: Option<String>,
    pub ip: Option<String>,
    pub should_count: bool,
    pub created_at: DateTime<Utc>,
}

/// A raw `(timestamp, type)` row from a windowed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementEvent {
    pub timestamp: DateTime<Utc>,
    pub engagement_type: EngagementType,
}
