use super::*;

/// Expected: Ok with only unexpired archives of the owner, newest first
#[tokio::test]
async fn lists_live_archives_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();

    factory::archive::ArchiveFactory::new(db, "555")
        .token("older")
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    factory::archive::ArchiveFactory::new(db, "555")
        .token("newer")
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::archive::ArchiveFactory::new(db, "555")
        .token("expired")
        .expires_at(now - Duration::minutes(1))
        .build()
        .await?;
    factory::archive::ArchiveFactory::new(db, "666")
        .token("someone-else")
        .build()
        .await?;

    let archives = ArchiveRepository::new(db).list_by_owner(555, now).await?;

    let tokens: Vec<&str> = archives.iter().map(|a| a.token.as_str()).collect();
    assert_eq!(tokens, vec!["newer", "older"]);

    Ok(())
}

/// Expected: Ok with empty list for owner without archives
#[tokio::test]
async fn returns_empty_for_unknown_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_archive(db, "555").await?;

    let archives = ArchiveRepository::new(db)
        .list_by_owner(777, Utc::now())
        .await?;
    assert!(archives.is_empty());

    Ok(())
}
