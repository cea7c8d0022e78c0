use crate::server::{
    data::archive::ArchiveRepository,
    error::AppError,
    model::archive::{ArchiveLocation, CreateArchiveParam, EntrySummary},
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_token;
mod get_by_token;
mod get_entries;
mod get_expired;
mod list_by_owner;

fn file_entry(name: &str, size: u64) -> EntrySummary {
    EntrySummary {
        name: name.to_string(),
        size_bytes: size,
        compressed_bytes: size / 2,
        sha256: Some("a".repeat(64)),
        is_dir: false,
    }
}

fn create_param(token: &str, owner_id: u64, entries: Vec<EntrySummary>) -> CreateArchiveParam {
    let now = Utc::now();
    CreateArchiveParam {
        token: token.to_string(),
        location: ArchiveLocation {
            guild_id: Some(111111111),
            channel_id: 222222222,
        },
        owner_id,
        file_name: "bundle.zip".to_string(),
        size_bytes: 2048,
        sha256: "b".repeat(64),
        entries,
        created_at: now,
        expires_at: now + Duration::hours(24),
    }
}
