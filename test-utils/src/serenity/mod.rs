//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return.
//!
//! - `attachment::create_test_attachment` - Create Serenity Attachment objects

pub mod attachment;

pub use attachment::create_test_attachment;
