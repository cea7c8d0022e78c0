use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "archive")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub token: String,
    pub guild_id: Option<String>,
    pub channel_id: String,
    pub owner_id: String,
    pub file_name: String,
    pub size_bytes: i64,
    pub sha256: String,
    pub entry_count: i32,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::archive_entry::Entity")]
    ArchiveEntry,
}

impl Related<super::archive_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArchiveEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
