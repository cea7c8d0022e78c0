use super::*;

/// Expected: Ok(Some) with matching archive
#[tokio::test]
async fn finds_existing_archive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::archive::ArchiveFactory::new(db, "444444444")
        .token("findme")
        .file_name("logs.zip")
        .build()
        .await?;

    let found = ArchiveRepository::new(db).get_by_token("findme").await?;

    let found = found.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.file_name, "logs.zip");
    assert_eq!(found.owner_id, 444444444);

    Ok(())
}

/// Expected: Ok(None) for unknown token
#[tokio::test]
async fn returns_none_for_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_archive(db, "444444444").await?;

    let found = ArchiveRepository::new(db).get_by_token("missing").await?;
    assert!(found.is_none());

    Ok(())
}

/// Tests that expired archives are still returned; expiry is the service's concern.
///
/// Expected: Ok(Some) for expired archive
#[tokio::test]
async fn returns_expired_archive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::archive::ArchiveFactory::new(db, "444444444")
        .token("old")
        .expires_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;

    let found = ArchiveRepository::new(db).get_by_token("old").await?;
    assert!(found.unwrap().is_expired(Utc::now()));

    Ok(())
}

/// Tests that a corrupt owner ID surfaces as an error instead of a silent default.
///
/// Expected: Err(InternalErr)
#[tokio::test]
async fn fails_on_non_numeric_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::archive::ArchiveFactory::new(db, "not-a-snowflake")
        .token("corrupt")
        .build()
        .await?;

    let result = ArchiveRepository::new(db).get_by_token("corrupt").await;
    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
