//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request through
//! Axum's state extraction. All fields are cheap to clone: `DatabaseConnection` is a
//! pool handle and `ArchiveSettings` only holds a path and a few numbers.

use sea_orm::DatabaseConnection;

use crate::server::service::archive::ArchiveSettings;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for archive records.
    pub db: DatabaseConnection,

    /// Archive storage location, limits and lifetime.
    pub settings: ArchiveSettings,

    /// Application base URL for generating download links.
    pub app_url: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: ArchiveSettings, app_url: String) -> Self {
        Self {
            db,
            settings,
            app_url,
        }
    }
}
