//! Archivist Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the archivist
//! bot. This crate offers a builder pattern for creating test contexts with in-memory SQLite
//! databases, factories for archive rows, and factories for Serenity API objects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_archive_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_archive_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
