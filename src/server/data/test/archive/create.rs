use super::*;

/// Tests creating an archive with entries.
///
/// Verifies that the archive row and each entry row are written and that the
/// entry count reflects the listing.
///
/// Expected: Ok with archive and two entries stored
#[tokio::test]
async fn creates_archive_with_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ArchiveRepository::new(db);
    let archive = repo
        .create(create_param(
            "tokenA",
            333333333,
            vec![file_entry("a.txt", 10), file_entry("b.txt", 20)],
        ))
        .await?;

    assert_eq!(archive.token, "tokenA");
    assert_eq!(archive.owner_id, 333333333);
    assert_eq!(archive.guild_id, Some(111111111));
    assert_eq!(archive.channel_id, 222222222);
    assert_eq!(archive.entry_count, 2);

    let stored_entries = entity::prelude::ArchiveEntry::find()
        .filter(entity::archive_entry::Column::ArchiveId.eq(archive.id))
        .count(db)
        .await?;
    assert_eq!(stored_entries, 2);

    Ok(())
}

/// Tests creating an archive requested from a direct message.
///
/// Expected: Ok with guild_id stored as NULL
#[tokio::test]
async fn stores_missing_guild_as_null() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut param = create_param("tokenDm", 333333333, vec![file_entry("a.txt", 10)]);
    param.location.guild_id = None;

    let archive = ArchiveRepository::new(db).create(param).await?;
    assert_eq!(archive.guild_id, None);

    let stored = entity::prelude::Archive::find_by_id(archive.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.guild_id.is_none());

    Ok(())
}

/// Tests that a duplicate token is rejected without leaving partial rows.
///
/// Expected: Err on the second insert, one archive and one entry remain
#[tokio::test]
async fn rejects_duplicate_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ArchiveRepository::new(db);
    repo.create(create_param("dup", 1, vec![file_entry("a.txt", 10)]))
        .await?;

    let result = repo
        .create(create_param("dup", 2, vec![file_entry("b.txt", 10)]))
        .await;
    assert!(result.is_err());

    assert_eq!(entity::prelude::Archive::find().count(db).await?, 1);
    assert_eq!(entity::prelude::ArchiveEntry::find().count(db).await?, 1);

    Ok(())
}
