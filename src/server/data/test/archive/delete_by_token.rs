use super::*;

/// Expected: Ok(true) with archive and entries removed
#[tokio::test]
async fn deletes_archive_and_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (archive, _) = test_utils::factory::helpers::create_archive_with_entries(db, "1", 3).await?;
    let (keep, _) = test_utils::factory::helpers::create_archive_with_entries(db, "1", 1).await?;

    let deleted = ArchiveRepository::new(db)
        .delete_by_token(&archive.token)
        .await?;
    assert!(deleted);

    assert!(entity::prelude::Archive::find_by_id(archive.id)
        .one(db)
        .await?
        .is_none());

    let remaining_entries = entity::prelude::ArchiveEntry::find().all(db).await?;
    assert_eq!(remaining_entries.len(), 1);
    assert_eq!(remaining_entries[0].archive_id, keep.id);

    Ok(())
}

/// Expected: Ok(false) for unknown token
#[tokio::test]
async fn returns_false_for_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_archive(db, "1").await?;

    let deleted = ArchiveRepository::new(db).delete_by_token("missing").await?;
    assert!(!deleted);
    assert_eq!(entity::prelude::Archive::find().count(db).await?, 1);

    Ok(())
}
