//! Archive service orchestrating packing, storage and persistence.
//!
//! `ArchiveService` ties the pure ZIP codec, the on-disk `ArchiveStorage` and the
//! `ArchiveRepository` together. Codec work runs on tokio's blocking pool since it is
//! CPU-bound on inputs up to the configured total size.

pub mod codec;
pub mod storage;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::archive::ArchiveRepository,
    error::AppError,
    model::archive::{
        Archive, ArchiveEntry, ArchiveLimits, ArchiveLocation, CreateArchiveParam, NamedFile,
        PackedArchive, UnpackedArchive,
    },
    service::token::generate_token,
};

use self::storage::ArchiveStorage;

/// Storage location, limits and lifetime shared by everything that handles archives.
#[derive(Debug, Clone)]
pub struct ArchiveSettings {
    pub storage: ArchiveStorage,
    pub limits: ArchiveLimits,
    pub ttl: Duration,
}

impl ArchiveSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            storage: ArchiveStorage::new(config.archive_dir.clone()),
            limits: config.limits(),
            ttl: config.archive_ttl,
        }
    }
}

/// A freshly stored archive together with its packed bytes.
pub struct CreatedArchive {
    pub archive: Archive,
    pub packed: PackedArchive,
}

pub struct ArchiveService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a ArchiveSettings,
}

impl<'a> ArchiveService<'a> {
    pub fn new(db: &'a DatabaseConnection, settings: &'a ArchiveSettings) -> Self {
        Self { db, settings }
    }

    /// Packs `files` into a new archive, stores it on disk and records it.
    ///
    /// If recording fails the written file is removed again.
    ///
    /// # Arguments
    /// - `owner_id` - Discord user requesting the archive
    /// - `location` - Guild and channel the request came from
    /// - `requested_name` - Optional archive name given by the user
    /// - `files` - Downloaded files to pack
    ///
    /// # Returns
    /// - `Ok(CreatedArchive)` - Stored archive record and packed bytes
    /// - `Err(AppError::ArchiveErr)` - Input violates archive limits
    /// - `Err(AppError)` - Filesystem or database failure
    pub async fn create_from_files(
        &self,
        owner_id: u64,
        location: ArchiveLocation,
        requested_name: Option<&str>,
        files: Vec<NamedFile>,
    ) -> Result<CreatedArchive, AppError> {
        let limits = self.settings.limits;
        let packed = tokio::task::spawn_blocking(move || codec::pack(files, &limits))
            .await
            .map_err(|e| AppError::InternalError(format!("Archive packing task failed: {}", e)))??;

        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.settings.ttl).ok_or_else(|| {
            AppError::InternalError(format!(
                "Archive lifetime of {} hours overflows the expiry time",
                self.settings.ttl.num_hours()
            ))
        })?;

        let token = generate_token();
        let file_name = codec::archive_file_name(requested_name, &token);

        self.settings.storage.write(&token, &packed.bytes).await?;

        let param = CreateArchiveParam {
            token: token.clone(),
            location,
            owner_id,
            file_name,
            size_bytes: packed.bytes.len() as u64,
            sha256: packed.sha256.clone(),
            entries: packed.entries.clone(),
            created_at: now,
            expires_at,
        };

        let archive = match ArchiveRepository::new(self.db).create(param).await {
            Ok(archive) => archive,
            Err(e) => {
                if let Err(cleanup) = self.settings.storage.remove(&token).await {
                    tracing::warn!("Failed to remove orphaned archive {}: {}", token, cleanup);
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Stored archive {} ({} entries, {} bytes) for user {}",
            archive.token,
            archive.entry_count,
            archive.size_bytes,
            owner_id
        );

        Ok(CreatedArchive { archive, packed })
    }

    /// Decompresses an archive received from a user.
    pub async fn unpack(&self, bytes: Vec<u8>) -> Result<UnpackedArchive, AppError> {
        let limits = self.settings.limits;
        let unpacked = tokio::task::spawn_blocking(move || codec::extract(&bytes, &limits))
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Archive extraction task failed: {}", e))
            })??;

        Ok(unpacked)
    }

    /// Gets a live archive by token.
    ///
    /// # Returns
    /// - `Ok(Some(Archive))` - Archive exists and has not expired at `now`
    /// - `Ok(None)` - Unknown, malformed or expired token
    pub async fn get(&self, token: &str, now: DateTime<Utc>) -> Result<Option<Archive>, AppError> {
        let archive = ArchiveRepository::new(self.db).get_by_token(token).await?;

        Ok(archive.filter(|archive| !archive.is_expired(now)))
    }

    /// Gets a live archive together with its entry listing.
    pub async fn get_with_entries(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<(Archive, Vec<ArchiveEntry>)>, AppError> {
        let Some(archive) = self.get(token, now).await? else {
            return Ok(None);
        };

        let entries = ArchiveRepository::new(self.db)
            .get_entries(archive.id)
            .await?;

        Ok(Some((archive, entries)))
    }

    /// Reads the stored bytes of an archive.
    pub async fn read_bytes(&self, archive: &Archive) -> Result<Vec<u8>, AppError> {
        self.settings.storage.read(&archive.token).await
    }

    /// Lists the owner's live archives, newest first.
    pub async fn list_for_owner(
        &self,
        owner_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Archive>, AppError> {
        ArchiveRepository::new(self.db)
            .list_by_owner(owner_id, now)
            .await
    }

    /// Deletes an archive record and its file.
    ///
    /// The record goes first so a concurrent download cannot find a record without a
    /// file for longer than the file removal takes. Once the record is gone the archive
    /// counts as deleted: a missing file is ignored and a failed removal is only logged.
    ///
    /// # Returns
    /// - `Ok(true)` - Archive record existed and was deleted
    /// - `Ok(false)` - No archive has this token
    pub async fn delete(&self, token: &str) -> Result<bool, AppError> {
        let deleted = ArchiveRepository::new(self.db)
            .delete_by_token(token)
            .await?;

        if !deleted {
            return Ok(false);
        }

        if let Err(e) = self.settings.storage.remove(token).await {
            tracing::warn!("Failed to remove file for deleted archive {}: {}", token, e);
        }
        tracing::info!("Deleted archive {}", token);

        Ok(true)
    }

    /// Deletes every archive expired at `now`.
    ///
    /// A failure on one archive is logged and does not stop the sweep.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of archives removed
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let expired = ArchiveRepository::new(self.db).get_expired(now).await?;

        let mut removed = 0;
        for archive in expired {
            match self.delete(&archive.token).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => tracing::error!("Failed to purge archive {}: {}", archive.token, e),
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::token::TOKEN_LENGTH;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use test_utils::builder::TestBuilder;

    fn settings(root: &std::path::Path) -> ArchiveSettings {
        ArchiveSettings {
            storage: ArchiveStorage::new(root),
            limits: ArchiveLimits {
                max_entries: 5,
                max_entry_bytes: 1024,
                max_total_bytes: 2048,
            },
            ttl: Duration::hours(1),
        }
    }

    fn location() -> ArchiveLocation {
        ArchiveLocation {
            guild_id: Some(1),
            channel_id: 2,
        }
    }

    /// Tests creating an archive from downloaded files.
    ///
    /// Expected: file on disk matches the packed bytes and the record lists both entries
    #[tokio::test]
    async fn creates_and_stores_archive() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let service = ArchiveService::new(db, &settings);
        let created = service
            .create_from_files(
                42,
                location(),
                Some("bundle"),
                vec![
                    NamedFile::new("a.txt", b"alpha".to_vec()),
                    NamedFile::new("b.txt", b"beta".to_vec()),
                ],
            )
            .await?;

        assert_eq!(created.archive.file_name, "bundle.zip");
        assert_eq!(created.archive.owner_id, 42);
        assert_eq!(created.archive.entry_count, 2);
        assert_eq!(created.archive.token.len(), TOKEN_LENGTH);
        assert_eq!(created.archive.sha256, created.packed.sha256);

        let stored = service.read_bytes(&created.archive).await?;
        assert_eq!(stored, created.packed.bytes);

        let (_, entries) = service
            .get_with_entries(&created.archive.token, Utc::now())
            .await?
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");

        Ok(())
    }

    /// Expected: Err(ArchiveErr) and nothing written to disk or database
    #[tokio::test]
    async fn rejects_oversized_input_without_side_effects() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let result = ArchiveService::new(db, &settings)
            .create_from_files(
                42,
                location(),
                None,
                vec![NamedFile::new("big.bin", vec![0u8; 4096])],
            )
            .await;

        assert!(matches!(result, Err(AppError::ArchiveErr(_))));
        assert_eq!(entity::prelude::Archive::find().count(db).await?, 0);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);

        Ok(())
    }

    /// Tests that a failed insert removes the file written before it.
    ///
    /// Expected: Err(DbErr) with the storage directory left empty
    #[tokio::test]
    async fn removes_file_when_insert_fails() -> Result<(), AppError> {
        // No tables, so the insert fails
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let result = ArchiveService::new(db, &settings)
            .create_from_files(
                42,
                location(),
                None,
                vec![NamedFile::new("a.txt", b"alpha".to_vec())],
            )
            .await;

        assert!(matches!(result, Err(AppError::DbErr(_))));
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_hides_expired_archives() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let service = ArchiveService::new(db, &settings);
        let created = service
            .create_from_files(7, location(), None, vec![NamedFile::new("a", b"a".to_vec())])
            .await?;
        let token = created.archive.token;

        assert!(service.get(&token, Utc::now()).await?.is_some());
        assert!(service
            .get(&token, Utc::now() + Duration::hours(2))
            .await?
            .is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_record_and_file() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let service = ArchiveService::new(db, &settings);
        let created = service
            .create_from_files(7, location(), None, vec![NamedFile::new("a", b"a".to_vec())])
            .await?;
        let token = created.archive.token;
        let path = settings.storage.path_for(&token)?;
        assert!(path.exists());

        assert!(service.delete(&token).await?);
        assert!(!path.exists());
        assert!(!service.delete(&token).await?);

        Ok(())
    }

    /// Tests deleting an archive whose file cannot be removed.
    ///
    /// Expected: Ok(true) with the record gone, the stuck path left in place
    #[tokio::test]
    async fn delete_succeeds_when_file_removal_fails() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let service = ArchiveService::new(db, &settings);
        let created = service
            .create_from_files(7, location(), None, vec![NamedFile::new("a", b"a".to_vec())])
            .await?;
        let token = created.archive.token;

        // A directory in place of the archive file cannot be unlinked
        let path = settings.storage.path_for(&token)?;
        std::fs::remove_file(&path)?;
        std::fs::create_dir(&path)?;

        assert!(service.delete(&token).await?);
        assert!(ArchiveRepository::new(db).get_by_token(&token).await?.is_none());
        assert!(path.is_dir());

        Ok(())
    }

    /// Expected: Err(InternalError) before anything is written
    #[tokio::test]
    async fn rejects_lifetime_past_representable_time() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = ArchiveSettings {
            ttl: Duration::MAX,
            ..settings(dir.path())
        };

        let result = ArchiveService::new(db, &settings)
            .create_from_files(7, location(), None, vec![NamedFile::new("a", b"a".to_vec())])
            .await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
        assert_eq!(entity::prelude::Archive::find().count(db).await?, 0);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);

        Ok(())
    }

    /// Tests the expiry sweep.
    ///
    /// Expected: only the expired archive is removed, including one whose file is
    /// already missing
    #[tokio::test]
    async fn purge_removes_only_expired() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_archive_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let service = ArchiveService::new(db, &settings);
        let keep = service
            .create_from_files(7, location(), None, vec![NamedFile::new("a", b"a".to_vec())])
            .await?;

        let expired_token = generate_token();
        test_utils::factory::archive::ArchiveFactory::new(db, "7")
            .token(expired_token.clone())
            .expires_at(Utc::now() - Duration::minutes(5))
            .build()
            .await?;

        let removed = service.purge_expired(Utc::now()).await?;

        assert_eq!(removed, 1);
        assert!(service.get(&keep.archive.token, Utc::now()).await?.is_some());
        assert!(ArchiveRepository::new(db)
            .get_by_token(&expired_token)
            .await?
            .is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unpacks_user_archive() -> Result<(), AppError> {
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let dir = tempfile::tempdir()?;
        let settings = settings(dir.path());

        let packed = codec::pack(
            vec![NamedFile::new("x.txt", b"xyz".to_vec())],
            &settings.limits,
        )?;

        let unpacked = ArchiveService::new(db, &settings)
            .unpack(packed.bytes)
            .await?;

        assert_eq!(unpacked.files.len(), 1);
        assert_eq!(unpacked.files[0].file.data, b"xyz");

        Ok(())
    }
}
