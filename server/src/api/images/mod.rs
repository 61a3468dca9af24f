pub mod get;

use std::sync::Arc;

use axum::routing::get as get_route;
use axum::Router;
use receptsamling_core::UrlSigner;
use utoipa::OpenApi;

use crate::db::DbPool;

/// State for the image-serving route: direct table access plus the signer
/// used to check signed URLs.
#[derive(Clone)]
pub struct ImagesState {
    pub pool: DbPool,
    pub signer: Option<UrlSigner>,
}

/// Returns the router for image blob serving (mounted at /images)
pub fn router() -> Router<Arc<ImagesState>> {
    // Blob identifiers contain a namespace slash, hence the wildcard.
    Router::new().route("/{*blob_id}", get_route(get::get_image))
}

#[derive(OpenApi)]
#[openapi(paths(get::get_image))]
pub struct ApiDoc;
