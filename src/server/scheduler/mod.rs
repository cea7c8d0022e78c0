//! Cron jobs for background maintenance.
//!
//! - `archive_cleanup` - Hourly removal of expired archives

pub mod archive_cleanup;
