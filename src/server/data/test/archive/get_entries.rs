use super::*;

/// Expected: Ok with entries in insertion order
#[tokio::test]
async fn returns_entries_in_insertion_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let archive = ArchiveRepository::new(db)
        .create(create_param(
            "ordered",
            1,
            vec![
                file_entry("z.txt", 1),
                file_entry("a.txt", 2),
                file_entry("m.txt", 3),
            ],
        ))
        .await?;

    let entries = ArchiveRepository::new(db).get_entries(archive.id).await?;

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["z.txt", "a.txt", "m.txt"]);
    assert_eq!(entries[1].size_bytes, 2);

    Ok(())
}

/// Expected: Ok with only the requested archive's entries
#[tokio::test]
async fn excludes_other_archives_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = test_utils::factory::helpers::create_archive_with_entries(db, "1", 2).await?;
    let (second, _) = test_utils::factory::helpers::create_archive_with_entries(db, "1", 3).await?;

    let repo = ArchiveRepository::new(db);
    assert_eq!(repo.get_entries(first.id).await?.len(), 2);
    assert_eq!(repo.get_entries(second.id).await?.len(), 3);

    Ok(())
}

/// Expected: directory entries keep their flag and carry no digest
#[tokio::test]
async fn keeps_directory_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_archive_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let archive = factory::create_archive(db, "1").await?;
    factory::archive_entry::ArchiveEntryFactory::new(db, archive.id)
        .name("docs/")
        .directory()
        .build()
        .await?;

    let entries = ArchiveRepository::new(db).get_entries(archive.id).await?;

    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_dir);
    assert!(entries[0].sha256.is_none());

    Ok(())
}
