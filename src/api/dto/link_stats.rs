//! DTOs for the per-link statistics endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::LinkStats;
use crate::domain::entities::EngagementType;
use crate::utils::time_range::TimeWindow;

/// Query parameters for `GET /api/links/{identifier}/stats`.
///
/// Bounds accept RFC 3339 instants or bare `YYYY-MM-DD` dates; either or both
/// may be omitted and are inferred from the configured maximum window.
#[derive(Debug, Deserialize)]
pub struct LinkStatsQuery {
    pub since: Option<String>,
    pub until: Option<String>,
}

/// Response body for `GET /api/links/{identifier}/stats`.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link_id: String,
    /// Resolved window bounds, Unix milliseconds.
    pub since: i64,
    pub until: i64,
    /// Counting engagements inside the window.
    pub total_count: i64,
    /// Raw events as `[timestamp_ms, type]` tuples, ordered by timestamp.
    pub events: Vec<(i64, EngagementType)>,
}

impl LinkStatsResponse {
    pub fn new(stats: LinkStats, window: &TimeWindow) -> Self {
        Self {
            link_id: stats.link_id,
            since: window.since.timestamp_millis(),
            until: window.until.timestamp_millis(),
            total_count: stats.total_count,
            events: stats
                .events
                .into_iter()
                .map(|e| (e.timestamp.timestamp_millis(), e.engagement_type))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EngagementEvent;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_events_serialize_as_tuples() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let response = LinkStatsResponse::new(
            LinkStats {
                link_id: "a1b2c3".to_string(),
                total_count: 1,
                events: vec![EngagementEvent {
                    timestamp: at,
                    engagement_type: EngagementType::Click,
                }],
            },
            &TimeWindow {
                since: at,
                until: at + chrono::Duration::hours(1),
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json["events"][0],
            serde_json::json!([at.timestamp_millis(), "CLICK"])
        );
        assert_eq!(json["total_count"], 1);
    }
}
