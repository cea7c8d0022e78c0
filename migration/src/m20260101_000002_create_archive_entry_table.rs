use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_archive_table::Archive;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArchiveEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(ArchiveEntry::Id))
                    .col(integer(ArchiveEntry::ArchiveId))
                    .col(string(ArchiveEntry::Name))
                    .col(big_integer(ArchiveEntry::SizeBytes))
                    .col(big_integer(ArchiveEntry::CompressedBytes))
                    .col(string_null(ArchiveEntry::Sha256))
                    .col(boolean(ArchiveEntry::IsDir).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_archive_entry_archive_id")
                            .from(ArchiveEntry::Table, ArchiveEntry::ArchiveId)
                            .to(Archive::Table, Archive::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_archive_entry_archive_id")
                    .table(ArchiveEntry::Table)
                    .col(ArchiveEntry::ArchiveId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArchiveEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ArchiveEntry {
    Table,
    Id,
    ArchiveId,
    Name,
    SizeBytes,
    CompressedBytes,
    Sha256,
    IsDir,
}
