//! Archive data repository for database operations.
//!
//! This module provides the `ArchiveRepository` for managing stored archive records and
//! their entry listings. Discord snowflakes are stored as strings and converted to `u64`
//! at this boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::archive::{Archive, ArchiveEntry, CreateArchiveParam},
};

/// Repository providing database operations for archives.
pub struct ArchiveRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArchiveRepository<'a> {
    /// Creates a new ArchiveRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an archive and all of its entries in a single transaction.
    ///
    /// # Arguments
    /// - `param` - Archive metadata plus the entry listing produced by the codec
    ///
    /// # Returns
    /// - `Ok(Archive)` - The created archive
    /// - `Err(AppError::DbErr)` - Insert failed (e.g. duplicate token); nothing was written
    pub async fn create(&self, param: CreateArchiveParam) -> Result<Archive, AppError> {
        let txn = self.db.begin().await?;

        let archive = entity::archive::ActiveModel {
            id: ActiveValue::NotSet,
            token: ActiveValue::Set(param.token),
            guild_id: ActiveValue::Set(param.location.guild_id.map(|id| id.to_string())),
            channel_id: ActiveValue::Set(param.location.channel_id.to_string()),
            owner_id: ActiveValue::Set(param.owner_id.to_string()),
            file_name: ActiveValue::Set(param.file_name),
            size_bytes: ActiveValue::Set(param.size_bytes as i64),
            sha256: ActiveValue::Set(param.sha256),
            entry_count: ActiveValue::Set(param.entries.len() as i32),
            created_at: ActiveValue::Set(param.created_at),
            expires_at: ActiveValue::Set(param.expires_at),
        }
        .insert(&txn)
        .await?;

        for entry in param.entries {
            entity::archive_entry::ActiveModel {
                id: ActiveValue::NotSet,
                archive_id: ActiveValue::Set(archive.id),
                name: ActiveValue::Set(entry.name),
                size_bytes: ActiveValue::Set(entry.size_bytes as i64),
                compressed_bytes: ActiveValue::Set(entry.compressed_bytes as i64),
                sha256: ActiveValue::Set(entry.sha256),
                is_dir: ActiveValue::Set(entry.is_dir),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Archive::from_entity(archive)
    }

    /// Gets an archive by its public token, regardless of expiry.
    ///
    /// # Returns
    /// - `Ok(Some(Archive))` - Archive found
    /// - `Ok(None)` - No archive has this token
    /// - `Err(AppError)` - Database error or corrupt stored ID
    pub async fn get_by_token(&self, token: &str) -> Result<Option<Archive>, AppError> {
        let entity = entity::prelude::Archive::find()
            .filter(entity::archive::Column::Token.eq(token))
            .one(self.db)
            .await?;

        entity.map(Archive::from_entity).transpose()
    }

    /// Gets the entries of an archive in the order they were written.
    pub async fn get_entries(&self, archive_id: i32) -> Result<Vec<ArchiveEntry>, DbErr> {
        let entries = entity::prelude::ArchiveEntry::find()
            .filter(entity::archive_entry::Column::ArchiveId.eq(archive_id))
            .order_by_asc(entity::archive_entry::Column::Id)
            .all(self.db)
            .await?;

        Ok(entries.into_iter().map(ArchiveEntry::from_entity).collect())
    }

    /// Lists an owner's archives that have not expired at `now`, newest first.
    pub async fn list_by_owner(
        &self,
        owner_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Archive>, AppError> {
        let entities = entity::prelude::Archive::find()
            .filter(entity::archive::Column::OwnerId.eq(owner_id.to_string()))
            .filter(entity::archive::Column::ExpiresAt.gt(now))
            .order_by_desc(entity::archive::Column::CreatedAt)
            .order_by_desc(entity::archive::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Archive::from_entity).collect()
    }

    /// Gets every archive whose expiry is at or before `now`.
    pub async fn get_expired(&self, now: DateTime<Utc>) -> Result<Vec<Archive>, AppError> {
        let entities = entity::prelude::Archive::find()
            .filter(entity::archive::Column::ExpiresAt.lte(now))
            .order_by_asc(entity::archive::Column::ExpiresAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Archive::from_entity).collect()
    }

    /// Deletes an archive and its entries.
    ///
    /// # Returns
    /// - `Ok(true)` - Archive existed and was deleted
    /// - `Ok(false)` - No archive has this token
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_token(&self, token: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let Some(archive) = entity::prelude::Archive::find()
            .filter(entity::archive::Column::Token.eq(token))
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        entity::prelude::ArchiveEntry::delete_many()
            .filter(entity::archive_entry::Column::ArchiveId.eq(archive.id))
            .exec(&txn)
            .await?;

        entity::prelude::Archive::delete_by_id(archive.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(true)
    }
}
