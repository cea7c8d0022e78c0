//! Filesystem storage for packed archives.
//!
//! Archives are written to `<root>/<token>.zip`. Writes go to a temporary file first
//! and are renamed into place so a reader never sees a partial archive.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::server::{error::AppError, service::token::is_valid_token};

#[derive(Debug, Clone)]
pub struct ArchiveStorage {
    root: PathBuf,
}

impl ArchiveStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the storage directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Path of the archive file for `token`.
    ///
    /// # Returns
    /// - `Ok(PathBuf)` - Path inside the storage root
    /// - `Err(AppError::BadRequest)` - Token is not a generated token
    pub fn path_for(&self, token: &str) -> Result<PathBuf, AppError> {
        if !is_valid_token(token) {
            return Err(AppError::BadRequest(format!("Invalid archive token '{}'", token)));
        }
        Ok(self.root.join(format!("{}.zip", token)))
    }

    /// Writes `bytes` as the archive file for `token`.
    ///
    /// On failure the temporary file is removed and no archive file is left behind.
    pub async fn write(&self, token: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.path_for(token)?;
        let tmp = path.with_extension("zip.part");

        let written = match tokio::fs::write(&tmp, bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e.into());
        }

        Ok(())
    }

    pub async fn read(&self, token: &str) -> Result<Vec<u8>, AppError> {
        let path = self.path_for(token)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound("Archive file is missing".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the archive file for `token`.
    ///
    /// # Returns
    /// - `Ok(true)` - File existed and was removed
    /// - `Ok(false)` - No file existed
    pub async fn remove(&self, token: &str) -> Result<bool, AppError> {
        let path = self.path_for(token)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
