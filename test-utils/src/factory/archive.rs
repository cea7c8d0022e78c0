//! Archive factory for creating test archive rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test archives with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let archive = ArchiveFactory::new(&db, "123456789")
///     .file_name("logs.zip")
///     .expires_at(Utc::now() + Duration::hours(2))
///     .build()
///     .await?;
/// ```
pub struct ArchiveFactory<'a> {
    db: &'a DatabaseConnection,
    token: String,
    guild_id: Option<String>,
    channel_id: String,
    owner_id: String,
    file_name: String,
    size_bytes: i64,
    sha256: String,
    entry_count: i32,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl<'a> ArchiveFactory<'a> {
    /// Creates a new ArchiveFactory with default values.
    ///
    /// Defaults:
    /// - token: `"token{id}"` where id is auto-incremented
    /// - guild_id: `Some("900000000000000000")`
    /// - file_name: `"archive-{id}.zip"`
    /// - created_at: now, expires_at: 24 hours from now
    pub fn new(db: &'a DatabaseConnection, owner_id: impl Into<String>) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            token: format!("token{:019}", id),
            guild_id: Some("900000000000000000".to_string()),
            channel_id: "800000000000000000".to_string(),
            owner_id: owner_id.into(),
            file_name: format!("archive-{}.zip", id),
            size_bytes: 1024,
            sha256: "0".repeat(64),
            entry_count: 0,
            created_at: now,
            expires_at: now + Duration::hours(24),
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn guild_id(mut self, guild_id: Option<String>) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn entry_count(mut self, entry_count: i32) -> Self {
        self.entry_count = entry_count;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Builds and inserts the archive entity into the database.
    pub async fn build(self) -> Result<entity::archive::Model, DbErr> {
        entity::archive::ActiveModel {
            id: ActiveValue::NotSet,
            token: ActiveValue::Set(self.token),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            owner_id: ActiveValue::Set(self.owner_id),
            file_name: ActiveValue::Set(self.file_name),
            size_bytes: ActiveValue::Set(self.size_bytes),
            sha256: ActiveValue::Set(self.sha256),
            entry_count: ActiveValue::Set(self.entry_count),
            created_at: ActiveValue::Set(self.created_at),
            expires_at: ActiveValue::Set(self.expires_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an archive with default values for the given owner.
pub async fn create_archive(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<entity::archive::Model, DbErr> {
    ArchiveFactory::new(db, owner_id).build().await
}
