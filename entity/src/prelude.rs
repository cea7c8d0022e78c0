pub use super::archive::Entity as Archive;
pub use super::archive_entry::Entity as ArchiveEntry;
