use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Archive::Table)
                    .if_not_exists()
                    .col(pk_auto(Archive::Id))
                    .col(string_uniq(Archive::Token))
                    .col(string_null(Archive::GuildId))
                    .col(string(Archive::ChannelId))
                    .col(string(Archive::OwnerId))
                    .col(string(Archive::FileName))
                    .col(big_integer(Archive::SizeBytes))
                    .col(string(Archive::Sha256))
                    .col(integer(Archive::EntryCount))
                    .col(timestamp(Archive::CreatedAt))
                    .col(timestamp(Archive::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        // Owner listings and the expiry sweep both filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_archive_owner_id")
                    .table(Archive::Table)
                    .col(Archive::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_archive_expires_at")
                    .table(Archive::Table)
                    .col(Archive::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_archive_expires_at")
                    .table(Archive::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_archive_owner_id")
                    .table(Archive::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Archive::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Archive {
    Table,
    Id,
    Token,
    GuildId,
    ChannelId,
    OwnerId,
    FileName,
    SizeBytes,
    Sha256,
    EntryCount,
    CreatedAt,
    ExpiresAt,
}
