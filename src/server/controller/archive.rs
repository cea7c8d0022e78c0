use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{api::ErrorDto, archive::ArchiveDto},
    server::{error::AppError, service::archive::ArchiveService, state::AppState},
};

pub static ARCHIVE_TAG: &str = "archive";

/// GET /api/archives/{token} - Get archive metadata and entry listing
///
/// # Path Parameters
/// - `token`: Archive token from the bot's reply
///
/// # Returns
/// - `200 OK`: ArchiveDto with entries in archive order
/// - `404 Not Found`: Unknown or expired token
/// - `500 Internal Server Error`: Database error
#[utoipa::path(
    get,
    path = "/api/archives/{token}",
    tag = ARCHIVE_TAG,
    params(
        ("token" = String, Path, description = "Archive token")
    ),
    responses(
        (status = 200, description = "Archive metadata", body = ArchiveDto),
        (status = 404, description = "Archive not found or expired", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_archive(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (archive, entries) = ArchiveService::new(&state.db, &state.settings)
        .get_with_entries(&token, Utc::now())
        .await?
        .ok_or_else(archive_not_found)?;

    Ok((StatusCode::OK, Json(archive.into_dto(&state.app_url, entries))))
}

/// GET /archives/{token}/download - Download the stored ZIP file
///
/// # Path Parameters
/// - `token`: Archive token from the bot's reply
///
/// # Returns
/// - `200 OK`: ZIP bytes served as an attachment named after the archive
/// - `404 Not Found`: Unknown or expired token, or the file is already gone
/// - `500 Internal Server Error`: Database or filesystem error
#[utoipa::path(
    get,
    path = "/archives/{token}/download",
    tag = ARCHIVE_TAG,
    params(
        ("token" = String, Path, description = "Archive token")
    ),
    responses(
        (status = 200, description = "ZIP archive", content_type = "application/zip"),
        (status = 404, description = "Archive not found or expired", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_archive(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = ArchiveService::new(&state.db, &state.settings);

    let archive = service
        .get(&token, Utc::now())
        .await?
        .ok_or_else(archive_not_found)?;
    let bytes = service.read_bytes(&archive).await?;

    tracing::debug!("Serving archive {} ({} bytes)", archive.token, bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&archive.file_name),
            ),
        ],
        bytes,
    ))
}

fn archive_not_found() -> AppError {
    AppError::NotFound("Archive not found".to_string())
}

/// Builds an attachment `Content-Disposition` value with a quoted, header-safe file name.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    format!("attachment; filename=\"{}\"", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_file_name() {
        assert_eq!(
            content_disposition("logs.zip"),
            "attachment; filename=\"logs.zip\""
        );
    }

    /// Expected: quotes and non-ASCII characters replaced so the header stays valid
    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(
            content_disposition("my \"best\" résumé.zip"),
            "attachment; filename=\"my _best_ r_sum_.zip\""
        );
    }
}
