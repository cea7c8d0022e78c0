use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::archive::{ArchiveService, ArchiveSettings},
};

/// Runs at minute 0 of every hour.
const CLEANUP_SCHEDULE: &str = "0 0 * * * *";

/// Starts the expired archive cleanup scheduler
///
/// # Arguments
/// - `db`: Database connection
/// - `settings`: Archive storage location used to remove files
pub async fn start_scheduler(
    db: DatabaseConnection,
    settings: ArchiveSettings,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let settings = settings.clone();

        Box::pin(async move {
            if let Err(e) = purge_expired_archives(&db, &settings, Utc::now()).await {
                tracing::error!("Error purging expired archives: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Archive cleanup scheduler started");

    Ok(())
}

/// Removes archives expired at `now` and logs how many went.
pub async fn purge_expired_archives(
    db: &DatabaseConnection,
    settings: &ArchiveSettings,
    now: DateTime<Utc>,
) -> Result<usize, AppError> {
    let removed = ArchiveService::new(db, settings).purge_expired(now).await?;

    if removed > 0 {
        tracing::info!("Purged {} expired archives", removed);
    } else {
        tracing::debug!("No expired archives to purge");
    }

    Ok(removed)
}
