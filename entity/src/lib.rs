//! SeaORM entity models for the archivist database.

pub mod prelude;

pub mod archive;
pub mod archive_entry;
