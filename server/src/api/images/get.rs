use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::images::ImagesState;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::schema::image_blobs;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SignatureParams {
    /// Unix timestamp the signed URL expires at
    pub expires: Option<i64>,
    /// Hex HMAC signature over the blob identifier and expiry
    pub sig: Option<String>,
}

fn forbidden(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/images/{blob_id}",
    tag = "images",
    params(
        ("blob_id" = String, Path, description = "Blob identifier, including namespace prefix"),
        SignatureParams,
    ),
    responses(
        (status = 200, description = "Image bytes with their stored content type"),
        (status = 403, description = "Missing, invalid or expired signature", body = ErrorResponse),
        (status = 404, description = "Unknown blob", body = ErrorResponse)
    )
)]
pub async fn get_image(
    State(state): State<Arc<ImagesState>>,
    Path(blob_id): Path<String>,
    Query(params): Query<SignatureParams>,
) -> impl IntoResponse {
    // With signing enabled every request must carry a valid, unexpired
    // signature. Without a key the URLs are public by configuration.
    if let Some(signer) = &state.signer {
        let (Some(expires), Some(sig)) = (params.expires, params.sig.as_deref()) else {
            return forbidden("A signed URL is required");
        };
        if !signer.verify(&blob_id, expires, sig, Utc::now()) {
            return forbidden("Invalid or expired signature");
        }
    }

    let mut conn = get_conn!(state.pool);

    let blob: (String, Vec<u8>) = match image_blobs::table
        .filter(image_blobs::name.eq(&blob_id))
        .select((image_blobs::content_type, image_blobs::data))
        .first(&mut conn)
    {
        Ok(blob) => blob,
        Err(diesel::result::Error::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Image not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch image blob: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch image".to_string(),
                }),
            )
                .into_response();
        }
    };

    let (content_type, data) = blob;

    // Signed URLs expire, so responses to them must not be cached forever.
    let cache_control = if state.signer.is_some() {
        "private, max-age=604800"
    } else {
        "public, max-age=31536000, immutable"
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(data))
        .unwrap()
}
