//! PostgreSQL implementation of the engagement repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{Engagement, EngagementEvent, EngagementType, NewEngagement};
use crate::domain::repositories::{EngagementRepository, LinkEngagementCount};
use crate::error::AppError;

/// PostgreSQL repository for the append-only engagement log.
///
/// Windowed reads lean on the `(link_id, created_at)` index; aggregations are
/// pushed into SQL rather than computed in process.
pub struct PgEngagementRepository {
    pool: Arc<PgPool>,
}

impl PgEngagementRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PgEngagementRepository {
    async fn append(&self, new_engagement: NewEngagement) -> Result<Engagement, AppError> {
        let row = sqlx::query(
            r#"
            INSERT INTO engagements (link_id, engagement_type, referer, ip, should_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new_engagement.link_id)
        .bind(new_engagement.engagement_type.as_str())
        .bind(&new_engagement.referer)
        .bind(&new_engagement.ip)
        .bind(new_engagement.should_count)
        .bind(new_engagement.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Engagement {
            id: row.try_get("id")?,
            link_id: new_engagement.link_id,
            engagement_type: new_engagement.engagement_type,
            referer: new_engagement.referer,
            ip: new_engagement.ip,
            should_count: new_engagement.should_count,
            created_at: new_engagement.created_at,
        })
    }

    async fn count_in_window(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        should_count_only: bool,
    ) -> Result<i64, AppError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM engagements
            WHERE link_id = $1
              AND created_at >= $2
              AND created_at <= $3
              AND (NOT $4 OR should_count)
            "#,
        )
        .bind(link_id)
        .bind(since)
        .bind(until)
        .bind(should_count_only)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.try_get::<i64, _>("count")?)
    }

    async fn list_in_window(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<EngagementEvent>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT created_at, engagement_type
            FROM engagements
            WHERE link_id = $1
              AND created_at >= $2
              AND created_at <= $3
            ORDER BY created_at
            "#,
        )
        .bind(link_id)
        .bind(since)
        .bind(until)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(EngagementEvent {
                    timestamp: row.try_get("created_at")?,
                    engagement_type: EngagementType::parse(
                        row.try_get::<String, _>("engagement_type")?.as_str(),
                    ),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn top_links_by_engagement(
        &self,
        workspace_id: &str,
        limit: i64,
    ) -> Result<Vec<LinkEngagementCount>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT e.link_id, COUNT(*) AS total_engagements
            FROM engagements e
            JOIN links l ON l.id = e.link_id
            WHERE l.workspace_id = $1 AND e.should_count
            GROUP BY e.link_id
            ORDER BY total_engagements DESC
            LIMIT $2
            "#,
        )
        .bind(workspace_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(LinkEngagementCount {
                    link_id: row.try_get("link_id")?,
                    total_engagements: row.try_get("total_engagements")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }
}
