pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_archive_table;
mod m20260101_000002_create_archive_entry_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_archive_table::Migration),
            Box::new(m20260101_000002_create_archive_entry_table::Migration),
        ]
    }
}
