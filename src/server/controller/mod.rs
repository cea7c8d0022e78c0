//! HTTP request handlers.
//!
//! - `archive` - Archive metadata and downloads by token
//! - `health` - Liveness check

pub mod archive;
pub mod health;
