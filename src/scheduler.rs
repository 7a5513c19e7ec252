use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::HistoryConfig;
use crate::db::Store;

/// Background jobs. Currently only search-history retention.
pub struct Scheduler {
    store: Store,
    config: HistoryConfig,
    inner: Option<JobScheduler>,
}

impl Scheduler {
    #[must_use]
    pub const fn new(store: Store, config: HistoryConfig) -> Self {
        Self {
            store,
            config,
            inner: None,
        }
    }

    /// Registers the retention job. Does nothing when no retention period is set.
    pub async fn start(&mut self) -> Result<()> {
        let Some(retention_days) = self.config.retention_days else {
            info!("History retention disabled, search records are kept indefinitely");
            return Ok(());
        };

        let sched = JobScheduler::new().await?;

        let store = self.store.clone();
        let job = Job::new_async(self.config.cleanup_cron.as_str(), move |_uuid, _lock| {
            let store = store.clone();
            Box::pin(async move {
                if let Err(e) = store.prune_searches(retention_days).await {
                    error!("Scheduled history cleanup failed: {}", e);
                }
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!(
            retention_days,
            "History cleanup scheduled with cron: {}", self.config.cleanup_cron
        );

        self.inner = Some(sched);
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(mut sched) = self.inner.take() {
            info!("Stopping scheduler...");
            if let Err(e) = sched.shutdown().await {
                error!("Scheduler shutdown failed: {}", e);
            }
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.inner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> Store {
        let db_path = std::env::temp_dir().join(format!(
            "weatherboard-scheduler-test-{}.db",
            uuid::Uuid::new_v4()
        ));
        Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_disabled_without_retention() {
        let mut scheduler = Scheduler::new(store().await, HistoryConfig::default());
        scheduler.start().await.unwrap();
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn test_starts_with_retention() {
        let config = HistoryConfig {
            retention_days: Some(30),
            ..HistoryConfig::default()
        };
        let mut scheduler = Scheduler::new(store().await, config);
        scheduler.start().await.unwrap();
        assert!(scheduler.is_running());

        scheduler.stop().await;
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn test_rejects_bad_cron() {
        let config = HistoryConfig {
            retention_days: Some(30),
            cleanup_cron: "not a cron".to_string(),
        };
        let mut scheduler = Scheduler::new(store().await, config);
        assert!(scheduler.start().await.is_err());
    }
}
