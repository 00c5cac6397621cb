//! Shared application state wired into every handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::services::{EngagementService, LinkService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::entities::NewEngagement;
use crate::domain::repositories::{EngagementRepository, LinkRepository};
use crate::utils::time_range::MaxDuration;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Service handles shared across requests.
///
/// Repositories are held as trait objects so the same wiring serves the
/// PostgreSQL implementations in production and in-memory ones in tests.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub engagement_service: Arc<EngagementService>,
    pub stats_service: Arc<StatsService<dyn LinkRepository, dyn EngagementRepository>>,
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub stats_max_window: MaxDuration,
}

impl AppState {
    /// Builds the service graph on top of the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        engagement_repository: Arc<dyn EngagementRepository>,
        engagement_tx: mpsc::Sender<NewEngagement>,
        config: &Config,
    ) -> Self {
        let redirect_service = Arc::new(RedirectService::new(
            Arc::clone(&link_repository),
            config.redirect_cache_capacity,
            Duration::from_secs(config.redirect_cache_ttl_seconds),
        ));

        let engagement_service = Arc::new(EngagementService::new(
            engagement_tx,
            Duration::from_secs(config.tracing_cookie_max_age_days * SECONDS_PER_DAY),
        ));

        let stats_service = Arc::new(StatsService::new(
            Arc::clone(&link_repository),
            engagement_repository,
            config.stats_cache_capacity,
            Duration::from_secs(config.stats_cache_ttl_seconds),
        ));

        let link_service = Arc::new(LinkService::new(
            link_repository,
            Arc::clone(&redirect_service),
        ));

        let stats_max_window = if config.stats_max_window_days == 0 {
            MaxDuration::Unbounded
        } else {
            MaxDuration::days(config.stats_max_window_days)
        };

        Self {
            redirect_service,
            engagement_service,
            stats_service,
            link_service,
            stats_max_window,
        }
    }
}
