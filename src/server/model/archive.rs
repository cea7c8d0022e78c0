//! Domain models for archive operations.
//!
//! Covers both the in-memory shapes the ZIP codec works with (`NamedFile`,
//! `PackedArchive`, `EntrySummary`, `ExtractedFile`) and the stored archive records
//! converted from entity models at the repository boundary.

use chrono::{DateTime, Utc};

use crate::{
    model::archive::{ArchiveDto, ArchiveEntryDto},
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Size and count limits enforced by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    pub max_entries: usize,
    pub max_entry_bytes: u64,
    pub max_total_bytes: u64,
}

/// A file held in memory, either downloaded for packing or extracted from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl NamedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Listing information for one entry of a ZIP container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    /// Entry path inside the archive, always relative and free of `..` components.
    pub name: String,
    pub size_bytes: u64,
    pub compressed_bytes: u64,
    /// Lowercase hex SHA-256 of the entry content. Only known once content was read.
    pub sha256: Option<String>,
    pub is_dir: bool,
}

/// Output of packing a set of files.
#[derive(Debug, Clone)]
pub struct PackedArchive {
    pub bytes: Vec<u8>,
    pub sha256: String,
    pub entries: Vec<EntrySummary>,
}

/// A file entry decompressed from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub file: NamedFile,
    pub sha256: String,
}

/// Output of extracting an archive.
#[derive(Debug, Clone)]
pub struct UnpackedArchive {
    /// Every entry in archive order; file entries carry their digest.
    pub entries: Vec<EntrySummary>,
    pub files: Vec<ExtractedFile>,
}

/// Where in Discord an archive was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLocation {
    /// `None` for direct messages.
    pub guild_id: Option<u64>,
    pub channel_id: u64,
}

/// Stored archive record.
#[derive(Debug, Clone, PartialEq)]
pub struct Archive {
    pub id: i32,
    pub token: String,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub owner_id: u64,
    pub file_name: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub entry_count: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Archive {
    /// Converts an entity model to an archive domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Archive)` - The converted archive
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored snowflake is not numeric
    pub fn from_entity(entity: entity::archive::Model) -> Result<Self, AppError> {
        let guild_id = entity.guild_id.map(parse_u64_from_string).transpose()?;

        Ok(Self {
            id: entity.id,
            token: entity.token,
            guild_id,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            owner_id: parse_u64_from_string(entity.owner_id)?,
            file_name: entity.file_name,
            size_bytes: entity.size_bytes.max(0) as u64,
            sha256: entity.sha256,
            entry_count: entity.entry_count.max(0) as u32,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Public download link for this archive.
    pub fn download_url(&self, app_url: &str) -> String {
        format!("{}/archives/{}/download", app_url, self.token)
    }

    pub fn into_dto(self, app_url: &str, entries: Vec<ArchiveEntry>) -> ArchiveDto {
        let download_url = self.download_url(app_url);
        ArchiveDto {
            token: self.token,
            file_name: self.file_name,
            size_bytes: self.size_bytes,
            sha256: self.sha256,
            entry_count: self.entry_count,
            created_at: self.created_at,
            expires_at: self.expires_at,
            download_url,
            entries: entries.into_iter().map(ArchiveEntry::into_dto).collect(),
        }
    }
}

/// Stored archive entry record.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub id: i32,
    pub archive_id: i32,
    pub name: String,
    pub size_bytes: u64,
    pub compressed_bytes: u64,
    pub sha256: Option<String>,
    pub is_dir: bool,
}

impl ArchiveEntry {
    pub fn from_entity(entity: entity::archive_entry::Model) -> Self {
        Self {
            id: entity.id,
            archive_id: entity.archive_id,
            name: entity.name,
            size_bytes: entity.size_bytes.max(0) as u64,
            compressed_bytes: entity.compressed_bytes.max(0) as u64,
            sha256: entity.sha256,
            is_dir: entity.is_dir,
        }
    }

    pub fn into_dto(self) -> ArchiveEntryDto {
        ArchiveEntryDto {
            name: self.name,
            size_bytes: self.size_bytes,
            compressed_bytes: self.compressed_bytes,
            sha256: self.sha256,
            is_dir: self.is_dir,
        }
    }
}

/// Parameters for recording a newly stored archive and its entries.
#[derive(Debug, Clone)]
pub struct CreateArchiveParam {
    pub token: String,
    pub location: ArchiveLocation,
    pub owner_id: u64,
    pub file_name: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub entries: Vec<EntrySummary>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
