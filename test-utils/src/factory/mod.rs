//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let archive = factory::create_archive(&db, "123").await?;
//!
//! // Customize
//! let expired = factory::archive::ArchiveFactory::new(&db, "123")
//!     .expires_at(Utc::now() - Duration::hours(1))
//!     .build()
//!     .await?;
//! ```

pub mod archive;
pub mod archive_entry;
pub mod helpers;

pub use archive::create_archive;
pub use archive_entry::create_archive_entry;
