use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Archive metadata returned by the web API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ArchiveDto {
    pub token: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub entry_count: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub download_url: String,
    pub entries: Vec<ArchiveEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ArchiveEntryDto {
    pub name: String,
    pub size_bytes: u64,
    pub compressed_bytes: u64,
    pub sha256: Option<String>,
    pub is_dir: bool,
}
