use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "archive_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub archive_id: i32,
    pub name: String,
    pub size_bytes: i64,
    pub compressed_bytes: i64,
    pub sha256: Option<String>,
    pub is_dir: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::archive::Entity",
        from = "Column::ArchiveId",
        to = "super::archive::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Archive,
}

impl Related<super::archive::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Archive.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
