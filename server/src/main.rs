mod api;
mod config;
mod db;
mod models;
mod schema;
mod storage;

use std::env;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::http::Request;
use axum::Router;
use receptsamling_core::{RecipeRepository, RecipeStore, UrlSigner};
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::images::ImagesState;
use crate::config::Config;
use crate::storage::{PgBlobStore, PgDocumentStore};

/// Matches the original deployment's request body cap (16 MiB).
const MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    init_telemetry();

    let config = Config::from_env();
    let pool = db::create_pool(&config.database_url);

    let signer = config.url_signing_key.clone().map(UrlSigner::new);
    if signer.is_none() {
        tracing::info!("URL_SIGNING_KEY not set, serving unsigned public image URLs");
    }

    let documents = PgDocumentStore::new(pool.clone());
    let blobs = PgBlobStore::new(pool.clone(), config.blob_namespace.clone(), signer.clone());
    let repository: Arc<dyn RecipeRepository> =
        Arc::new(RecipeStore::new(documents, Some(blobs)));

    let images_state = Arc::new(ImagesState { pool, signer });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .nest("/api/recipes", api::recipes::router().with_state(repository))
        .nest("/images", api::images::router().with_state(images_state))
        .merge(swagger_ui)
        .layer(DefaultBodyLimit::max(MAX_CONTENT_LENGTH))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.expect("Server error");
}
