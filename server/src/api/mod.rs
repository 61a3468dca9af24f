pub mod images;
pub mod recipes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receptsamling_core::StorageError;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a repository error onto the HTTP surface.
///
/// Backend failures are logged here and deliberately not echoed to the
/// client; validation messages are.
pub fn storage_error(err: StorageError) -> Response {
    match err {
        StorageError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        StorageError::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        StorageError::StorageUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: StorageError::StorageUnavailable.to_string(),
            }),
        )
            .into_response(),
        StorageError::Backend(message) => {
            tracing::error!("storage backend error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Storage backend error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        recipes::ApiDoc::openapi(),
        images::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
