//! Server-side bot, API backend and business logic.
//!
//! The binary runs three things against one SQLite database and one archive directory:
//! the Discord bot, the HTTP API serving archive metadata and downloads, and a cron job
//! removing expired archives.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Archive packing, storage, attachment downloads
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state for request handlers
//! - **Startup** (`startup`) - Tracing, database, HTTP client and storage initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs for expired archive cleanup
//! - **Bot** (`bot/`) - Discord commands, replies and event handlers
//!
//! # Request Flow
//!
//! Chat commands and HTTP requests both end up in `ArchiveService`:
//!
//! 1. **Bot handler** or **Controller** receives the command or request
//! 2. **Service** packs or unpacks archives, stores files, calls the data layer
//! 3. **Data** queries the database, converts entities to domain models
//! 4. The caller turns the domain model into an embed or a DTO

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
