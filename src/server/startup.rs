use std::time::Duration;

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::server::{config::Config, error::AppError, service::archive::ArchiveSettings};

const DEFAULT_LOG_FILTER: &str = "info,archivist=debug";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the archive tables exist
/// before the bot or the HTTP server touch them.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for attachment downloads.
///
/// Redirects are disabled so an allowed host cannot bounce a request somewhere else.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Derives archive settings from configuration and creates the storage directory.
pub async fn setup_archive_settings(config: &Config) -> Result<ArchiveSettings, AppError> {
    let settings = ArchiveSettings::from_config(config);

    settings.storage.ensure_dir().await?;

    tracing::info!(
        "Storing archives in {}",
        settings.storage.root().display()
    );

    Ok(settings)
}
