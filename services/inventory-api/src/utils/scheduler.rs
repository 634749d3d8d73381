// /apotek-inventory/services/inventory-api/src/utils/scheduler.rs

use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    repository::Repository,
    utils::error::{AppError, AppResult},
};

/// Start background jobs untuk maintenance tasks
pub async fn start_background_jobs(repository: Arc<Repository>) -> AppResult<()> {
    let scheduler = JobScheduler::new().await
        .map_err(|e| AppError::Configuration(format!("Failed to create scheduler: {}", e)))?;

    // Cleanup refresh token kedaluwarsa/revoked setiap 1 jam
    let repo_clone = repository.clone();
    let cleanup_job = Job::new_async("0 0 */1 * * *", move |_uuid, _l| {
        let repo = repo_clone.clone();
        Box::pin(async move {
            match repo.refresh_token().cleanup_expired().await {
                Ok(removed) if removed > 0 => {
                    tracing::info!("Refresh token cleanup removed {} rows", removed);
                }
                Ok(_) => {
                    tracing::debug!("Refresh token cleanup: nothing to remove");
                }
                Err(e) => {
                    tracing::error!("Refresh token cleanup failed: {}", e);
                }
            }
        })
    })
    .map_err(|e| AppError::Configuration(format!("Failed to create cleanup job: {}", e)))?;

    scheduler.add(cleanup_job).await
        .map_err(|e| AppError::Configuration(format!("Failed to add cleanup job: {}", e)))?;

    scheduler.start().await
        .map_err(|e| AppError::Configuration(format!("Failed to start scheduler: {}", e)))?;

    tracing::info!("Background jobs scheduler started");

    Ok(())
}
