//! Engagement statistics and aggregation service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::EngagementEvent;
use crate::domain::repositories::{EngagementRepository, LinkEngagementCount, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::TtlCache;
use crate::utils::time_range::{TimeWindow, minute_bucket};

/// Number of links in the workspace ranking.
const TOP_LINKS_LIMIT: i64 = 3;

/// Windowed statistics for a single link.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link_id: String,
    /// Counting engagements only (`should_count = true`).
    pub total_count: i64,
    /// Every raw event in the window, non-counting rows included.
    pub events: Vec<EngagementEvent>,
}

/// All-time aggregates for a workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceStats {
    pub link_count: i64,
    pub total_engagements: i64,
    pub total_engagements_last_week: i64,
    /// Top links by counting engagements, descending. Tie order follows store
    /// iteration order and is not defined.
    pub top_links: Vec<LinkEngagementCount>,
}

/// Service computing per-link and per-workspace engagement statistics.
///
/// Results are cached briefly so dashboards polling the same window do not
/// hammer the store. The per-link cache key truncates the window bounds to
/// minute granularity: two requests for "the last hour" issued seconds apart
/// share an entry even though their exact bounds differ.
pub struct StatsService<L: LinkRepository + ?Sized, E: EngagementRepository + ?Sized> {
    link_repository: Arc<L>,
    engagement_repository: Arc<E>,
    link_cache: TtlCache<String, LinkStats>,
    workspace_cache: TtlCache<String, WorkspaceStats>,
}

impl<L, E> StatsService<L, E>
where
    L: LinkRepository + ?Sized,
    E: EngagementRepository + ?Sized,
{
    pub fn new(
        link_repository: Arc<L>,
        engagement_repository: Arc<E>,
        cache_capacity: usize,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            link_repository,
            engagement_repository,
            link_cache: TtlCache::new(cache_capacity, cache_ttl),
            workspace_cache: TtlCache::new(cache_capacity, cache_ttl),
        }
    }

    /// Computes statistics for one link over `window`.
    ///
    /// The link is looked up by id or short name; disabled links still report
    /// stats, since this is an owner-facing view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `identifier`.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_link_stats(
        &self,
        identifier: &str,
        window: TimeWindow,
    ) -> Result<LinkStats, AppError> {
        let link = self
            .link_repository
            .find_by_id_or_short_name(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "identifier": identifier }))
            })?;

        let cache_key = format!(
            "{}:{}:{}",
            link.id,
            minute_bucket(window.since),
            minute_bucket(window.until)
        );
        if let Some(hit) = self.link_cache.get(&cache_key) {
            return Ok(hit);
        }

        let total_count = self
            .engagement_repository
            .count_in_window(&link.id, window.since, window.until, true)
            .await?;
        let events = self
            .engagement_repository
            .list_in_window(&link.id, window.since, window.until)
            .await?;

        let stats = LinkStats {
            link_id: link.id,
            total_count,
            events,
        };
        self.link_cache.set(cache_key, stats.clone());
        Ok(stats)
    }

    /// Computes all-time aggregates for a workspace.
    ///
    /// A workspace with no links reports zeros, not an error: an empty
    /// dashboard is a valid dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_workspace_stats(
        &self,
        workspace_id: &str,
    ) -> Result<WorkspaceStats, AppError> {
        let cache_key = workspace_id.to_string();
        if let Some(hit) = self.workspace_cache.get(&cache_key) {
            return Ok(hit);
        }

        let links = self.link_repository.find_by_workspace(workspace_id).await?;
        let link_count = self.link_repository.count_by_workspace(workspace_id).await?;

        let now = Utc::now();
        let week_ago = now - chrono::Duration::days(7);
        let epoch = DateTime::<Utc>::UNIX_EPOCH;

        let mut total_engagements = 0;
        let mut total_engagements_last_week = 0;
        for link in &links {
            total_engagements += self
                .engagement_repository
                .count_in_window(&link.id, epoch, now, true)
                .await?;
            total_engagements_last_week += self
                .engagement_repository
                .count_in_window(&link.id, week_ago, now, true)
                .await?;
        }

        let top_links = self
            .engagement_repository
            .top_links_by_engagement(workspace_id, TOP_LINKS_LIMIT)
            .await?;

        let stats = WorkspaceStats {
            link_count,
            total_engagements,
            total_engagements_last_week,
            top_links,
        };
        self.workspace_cache.set(cache_key, stats.clone());
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EngagementType, Link};
    use crate::domain::repositories::{MockEngagementRepository, MockLinkRepository};
    use chrono::TimeZone;

    fn sample_link(id: &str, workspace_id: &str) -> Link {
        let now = Utc::now();
        Link::new(
            id.to_string(),
            None,
            None,
            "https://example.com".to_string(),
            workspace_id.to_string(),
            true,
            false,
            now,
            now,
        )
    }

    fn service(
        links: MockLinkRepository,
        engagements: MockEngagementRepository,
    ) -> StatsService<MockLinkRepository, MockEngagementRepository> {
        StatsService::new(
            Arc::new(links),
            Arc::new(engagements),
            100,
            Duration::from_secs(30),
        )
    }

    fn window(since: DateTime<Utc>, until: DateTime<Utc>) -> TimeWindow {
        TimeWindow { since, until }
    }

    #[tokio::test]
    async fn test_link_stats_counts_only_counting_rows() {
        let since = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_id_or_short_name()
            .withf(|id| id == "launch")
            .returning(|_| Ok(Some(sample_link("a1b2c3", "ws_1"))));

        let inside = since + chrono::Duration::hours(1);
        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_count_in_window()
            .withf(move |id, s, u, counting_only| {
                id == "a1b2c3" && *s == since && *u == until && *counting_only
            })
            .times(1)
            .returning(|_, _, _, _| Ok(3));
        mock_engagements
            .expect_list_in_window()
            .times(1)
            .returning(move |_, _, _| {
                Ok(vec![
                    EngagementEvent {
                        timestamp: inside,
                        engagement_type: EngagementType::Click,
                    },
                    EngagementEvent {
                        timestamp: inside,
                        engagement_type: EngagementType::Click,
                    },
                    EngagementEvent {
                        timestamp: inside,
                        engagement_type: EngagementType::Click,
                    },
                    // A deduplicated repeat visit still shows in the raw list.
                    EngagementEvent {
                        timestamp: inside,
                        engagement_type: EngagementType::Qr,
                    },
                ])
            });

        let stats = service(mock_links, mock_engagements)
            .get_link_stats("launch", window(since, until))
            .await
            .unwrap();

        assert_eq!(stats.link_id, "a1b2c3");
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.events.len(), 4);
    }

    #[tokio::test]
    async fn test_link_stats_unknown_identifier() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_id_or_short_name()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock_links, MockEngagementRepository::new())
            .get_link_stats("ghost", window(Utc::now() - chrono::Duration::days(1), Utc::now()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_same_minute_windows_share_a_cache_entry() {
        let since = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 2).unwrap();
        let until = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 2).unwrap();

        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_id_or_short_name()
            .returning(|_| Ok(Some(sample_link("a1b2c3", "ws_1"))));

        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_count_in_window()
            .times(1)
            .returning(|_, _, _, _| Ok(1));
        mock_engagements
            .expect_list_in_window()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = service(mock_links, mock_engagements);

        service
            .get_link_stats("a1b2c3", window(since, until))
            .await
            .unwrap();
        // Bounds differ by seconds but truncate to the same minute.
        service
            .get_link_stats(
                "a1b2c3",
                window(
                    since + chrono::Duration::seconds(30),
                    until + chrono::Duration::seconds(30),
                ),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_windows_do_not_share_entries() {
        let since = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_id_or_short_name()
            .returning(|_| Ok(Some(sample_link("a1b2c3", "ws_1"))));

        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_count_in_window()
            .times(2)
            .returning(|_, _, _, _| Ok(1));
        mock_engagements
            .expect_list_in_window()
            .times(2)
            .returning(|_, _, _| Ok(vec![]));

        let service = service(mock_links, mock_engagements);

        service
            .get_link_stats("a1b2c3", window(since, until))
            .await
            .unwrap();
        service
            .get_link_stats(
                "a1b2c3",
                window(since, until + chrono::Duration::minutes(5)),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_workspace_stats_sums_per_link_totals() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_workspace()
            .withf(|ws| ws == "ws_1")
            .times(1)
            .returning(|_| Ok(vec![sample_link("a", "ws_1"), sample_link("b", "ws_1")]));
        mock_links
            .expect_count_by_workspace()
            .times(1)
            .returning(|_| Ok(2));

        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_count_in_window()
            .times(4)
            .returning(|link_id, since, _, _| {
                let all_time = since == DateTime::<Utc>::UNIX_EPOCH;
                Ok(match (link_id, all_time) {
                    ("a", true) => 5,
                    ("b", true) => 7,
                    ("a", false) => 1,
                    _ => 2,
                })
            });
        mock_engagements
            .expect_top_links_by_engagement()
            .withf(|ws, limit| ws == "ws_1" && *limit == 3)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    LinkEngagementCount {
                        link_id: "b".to_string(),
                        total_engagements: 7,
                    },
                    LinkEngagementCount {
                        link_id: "a".to_string(),
                        total_engagements: 5,
                    },
                ])
            });

        let stats = service(mock_links, mock_engagements)
            .get_workspace_stats("ws_1")
            .await
            .unwrap();

        assert_eq!(stats.link_count, 2);
        assert_eq!(stats.total_engagements, 12);
        assert_eq!(stats.total_engagements_last_week, 3);
        assert_eq!(stats.top_links[0].link_id, "b");
    }

    #[tokio::test]
    async fn test_empty_workspace_reports_zeros() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_workspace()
            .returning(|_| Ok(vec![]));
        mock_links.expect_count_by_workspace().returning(|_| Ok(0));

        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_top_links_by_engagement()
            .returning(|_, _| Ok(vec![]));

        let stats = service(mock_links, mock_engagements)
            .get_workspace_stats("ws_empty")
            .await
            .unwrap();

        assert_eq!(stats.link_count, 0);
        assert_eq!(stats.total_engagements, 0);
        assert!(stats.top_links.is_empty());
    }

    #[tokio::test]
    async fn test_workspace_stats_are_cached() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_workspace()
            .times(1)
            .returning(|_| Ok(vec![]));
        mock_links
            .expect_count_by_workspace()
            .times(1)
            .returning(|_| Ok(0));

        let mut mock_engagements = MockEngagementRepository::new();
        mock_engagements
            .expect_top_links_by_engagement()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = service(mock_links, mock_engagements);
        service.get_workspace_stats("ws_1").await.unwrap();
        service.get_workspace_stats("ws_1").await.unwrap();
    }
}
