//! Service layer for business logic.
//!
//! Services orchestrate repositories, the filesystem and external clients. Controllers
//! and bot handlers call into services; services never talk to Discord or HTTP
//! responses directly.

pub mod archive;
pub mod fetch;
pub mod token;
