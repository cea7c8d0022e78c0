use super::*;

/// Tests that only archives at or past their expiry are returned.
///
/// Expected: Ok with the two expired archives, oldest expiry first
#[tokio::test]
async fn returns_only_expired_archives() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();

    factory::archive::ArchiveFactory::new(db, "1")
        .token("boundary")
        .expires_at(now)
        .build()
        .await?;
    factory::archive::ArchiveFactory::new(db, "1")
        .token("long-gone")
        .expires_at(now - Duration::days(2))
        .build()
        .await?;
    factory::archive::ArchiveFactory::new(db, "1")
        .token("alive")
        .expires_at(now + Duration::seconds(1))
        .build()
        .await?;

    let expired = ArchiveRepository::new(db).get_expired(now).await?;

    let tokens: Vec<&str> = expired.iter().map(|a| a.token.as_str()).collect();
    assert_eq!(tokens, vec!["long-gone", "boundary"]);

    Ok(())
}
