//! Asynchronous engagement append worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::error;

use crate::domain::entities::NewEngagement;
use crate::domain::repositories::EngagementRepository;

/// Drains the engagement queue and appends each record to the store.
///
/// Runs for the lifetime of the channel: the redirect path stays decoupled from
/// store latency, and a failed append costs one analytics event, never a
/// redirect. Failures must be visible to an operator, so they are logged at
/// error severity rather than dropped silently.
pub async fn run_engagement_worker<E>(mut rx: mpsc::Receiver<NewEngagement>, repository: Arc<E>)
where
    E: EngagementRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        let link_id = event.link_id.clone();
        if let Err(e) = repository.append(event).await {
            error!(%link_id, error = %e, "failed to append engagement");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Engagement, EngagementType};
    use crate::domain::repositories::MockEngagementRepository;
    use chrono::Utc;

    fn sample_event(link_id: &str) -> NewEngagement {
        NewEngagement {
            link_id: link_id.to_string(),
            engagement_type: EngagementType::Click,
            referer: None,
            ip: None,
            should_count: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_worker_appends_queued_events() {
        let mut mock_repo = MockEngagementRepository::new();
        mock_repo
            .expect_append()
            .withf(|e| e.link_id == "a1b2c3")
            .times(2)
            .returning(|e| {
                Ok(Engagement {
                    id: 1,
                    link_id: e.link_id,
                    engagement_type: e.engagement_type,
                    referer: e.referer,
                    ip: e.ip,
                    should_count: e.should_count,
                    created_at: e.created_at,
                })
            });

        let (tx, rx) = mpsc::channel(16);
        tx.send(sample_event("a1b2c3")).await.unwrap();
        tx.send(sample_event("a1b2c3")).await.unwrap();
        drop(tx);

        run_engagement_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_survives_append_failure() {
        let mut mock_repo = MockEngagementRepository::new();
        mock_repo.expect_append().times(2).returning(|e| {
            if e.link_id == "broken" {
                Err(crate::error::AppError::store(
                    "Database error",
                    serde_json::json!({}),
                ))
            } else {
                Ok(Engagement {
                    id: 2,
                    link_id: e.link_id,
                    engagement_type: e.engagement_type,
                    referer: e.referer,
                    ip: e.ip,
                    should_count: e.should_count,
                    created_at: e.created_at,
                })
            }
        });

        let (tx, rx) = mpsc::channel(16);
        tx.send(sample_event("broken")).await.unwrap();
        tx.send(sample_event("a1b2c3")).await.unwrap();
        drop(tx);

        // A failed append must not stop the worker from draining the queue.
        run_engagement_worker(rx, Arc::new(mock_repo)).await;
    }
}
