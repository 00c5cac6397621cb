//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn link_from_row(row: &PgRow) -> Result<Link, sqlx::Error> {
    Ok(Link::new(
        row.try_get("id")?,
        row.try_get("short_name")?,
        row.try_get("title")?,
        row.try_get("url")?,
        row.try_get("workspace_id")?,
        row.try_get("enabled")?,
        row.try_get("smart_engagement_counting")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

const LINK_COLUMNS: &str = "id, short_name, title, url, workspace_id, enabled, \
                            smart_engagement_counting, created_at, updated_at";

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_id_or_short_name(&self, identifier: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1 OR short_name = $1"
        ))
        .bind(identifier)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|r| link_from_row(&r)).transpose().map_err(Into::into)
    }

    async fn find_by_workspace(&self, workspace_id: &str) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE workspace_id = $1 ORDER BY created_at DESC"
        ))
        .bind(workspace_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(link_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn count_by_workspace(&self, workspace_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM links WHERE workspace_id = $1")
            .bind(workspace_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.try_get::<i64, _>("count")?)
    }

    async fn update(&self, link_id: &str, patch: LinkPatch) -> Result<Link, AppError> {
        // COALESCE keeps unspecified fields untouched in one round trip; title
        // needs an explicit change flag since "set to NULL" is a valid change.
        let title_changed = patch.title.is_some();
        let row = sqlx::query(&format!(
            r#"
            UPDATE links SET
                url = COALESCE($2, url),
                title = CASE WHEN $3 THEN $4 ELSE title END,
                enabled = COALESCE($5, enabled),
                smart_engagement_counting = COALESCE($6, smart_engagement_counting),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(link_id)
        .bind(patch.url)
        .bind(title_changed)
        .bind(patch.title.flatten())
        .bind(patch.enabled)
        .bind(patch.smart_engagement_counting)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(r) => Ok(link_from_row(&r)?),
            None => Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            )),
        }
    }
}
