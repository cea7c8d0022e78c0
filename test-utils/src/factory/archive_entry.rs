//! Archive entry factory for creating test archive entry rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating archive entries with customizable fields.
pub struct ArchiveEntryFactory<'a> {
    db: &'a DatabaseConnection,
    archive_id: i32,
    name: String,
    size_bytes: i64,
    compressed_bytes: i64,
    sha256: Option<String>,
    is_dir: bool,
}

impl<'a> ArchiveEntryFactory<'a> {
    /// Creates a new factory for a file entry named `"file-{id}.txt"` of 128 bytes.
    pub fn new(db: &'a DatabaseConnection, archive_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            archive_id,
            name: format!("file-{}.txt", id),
            size_bytes: 128,
            compressed_bytes: 64,
            sha256: Some("f".repeat(64)),
            is_dir: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn size_bytes(mut self, size_bytes: i64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    /// Marks the entry as a directory, which carries no size or digest.
    pub fn directory(mut self) -> Self {
        self.is_dir = true;
        self.size_bytes = 0;
        self.compressed_bytes = 0;
        self.sha256 = None;
        self
    }

    /// Builds and inserts the archive entry entity into the database.
    pub async fn build(self) -> Result<entity::archive_entry::Model, DbErr> {
        entity::archive_entry::ActiveModel {
            id: ActiveValue::NotSet,
            archive_id: ActiveValue::Set(self.archive_id),
            name: ActiveValue::Set(self.name),
            size_bytes: ActiveValue::Set(self.size_bytes),
            compressed_bytes: ActiveValue::Set(self.compressed_bytes),
            sha256: ActiveValue::Set(self.sha256),
            is_dir: ActiveValue::Set(self.is_dir),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a file entry with default values for the given archive.
pub async fn create_archive_entry(
    db: &DatabaseConnection,
    archive_id: i32,
) -> Result<entity::archive_entry::Model, DbErr> {
    ArchiveEntryFactory::new(db, archive_id).build().await
}
