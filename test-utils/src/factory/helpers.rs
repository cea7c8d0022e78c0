//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an archive owned by `owner_id` together with `entry_count` file entries.
///
/// # Returns
/// - `Ok((archive, entries))` - The archive row and its entries in insertion order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_archive_with_entries(
    db: &DatabaseConnection,
    owner_id: &str,
    entry_count: usize,
) -> Result<(entity::archive::Model, Vec<entity::archive_entry::Model>), DbErr> {
    let archive = crate::factory::archive::ArchiveFactory::new(db, owner_id)
        .entry_count(entry_count as i32)
        .build()
        .await?;

    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        entries.push(crate::factory::archive_entry::create_archive_entry(db, archive.id).await?);
    }

    Ok((archive, entries))
}
