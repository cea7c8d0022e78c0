use axum::{http::Method, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::{
    model::{
        api::{ErrorDto, HealthDto},
        archive::{ArchiveDto, ArchiveEntryDto},
    },
    server::{
        controller::{
            archive::{self, download_archive, get_archive},
            health::{self, health},
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Archivist API"),
    paths(health::health, archive::get_archive, archive::download_archive),
    components(schemas(ArchiveDto, ArchiveEntryDto, ErrorDto, HealthDto)),
    tags(
        (name = health::HEALTH_TAG, description = "Service status"),
        (name = archive::ARCHIVE_TAG, description = "Stored archives")
    )
)]
pub struct ApiDoc;

/// HTTP routes for the read-only archive API.
///
/// Every route is a GET, so cross-origin access is allowed for GET from any origin.
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/archives/{token}", get(get_archive))
        .route("/archives/{token}/download", get(download_archive))
        .layer(cors)
}
