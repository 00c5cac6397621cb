//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::domain::engagement_worker::run_engagement_worker;
use crate::domain::repositories::{EngagementRepository, LinkRepository};
use crate::infrastructure::persistence::{PgEngagementRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Background engagement worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let engagement_repository: Arc<dyn EngagementRepository> =
        Arc::new(PgEngagementRepository::new(pool.clone()));

    let (engagement_tx, engagement_rx) = mpsc::channel(config.engagement_queue_capacity);
    tokio::spawn(run_engagement_worker(
        engagement_rx,
        Arc::clone(&engagement_repository),
    ));
    tracing::info!("Engagement worker started");

    let state = AppState::new(
        link_repository,
        engagement_repository,
        engagement_tx,
        &config,
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
