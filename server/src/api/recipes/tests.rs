//! Handler tests, run against the in-memory repository.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use receptsamling_core::{
    MemoryBlobStore, MemoryDocumentStore, RecipeRepository, RecipeStore,
};
use tower::ServiceExt;

use crate::api::recipes;

use super::list::ListRecipesResponse;
use super::RecipeResponse;

const BOUNDARY: &str = "----receptsamling-test-boundary";

fn test_app() -> Router {
    let repository: Arc<dyn RecipeRepository> = Arc::new(RecipeStore::new(
        MemoryDocumentStore::new(),
        Some(MemoryBlobStore::new("recipes")),
    ));
    Router::new().nest("/api/recipes", recipes::router().with_state(repository))
}

/// Build a multipart/form-data body from text fields plus an optional
/// (filename, content type, bytes) file part named `image`.
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, filename, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: axum::http::Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_recipe(
    app: &Router,
    title: &str,
    ingredients: &str,
    file: Option<(&str, &str, &[u8])>,
) -> RecipeResponse {
    let body = multipart_body(
        &[
            ("title", title),
            ("description", "test"),
            ("ingredients", ingredients),
            ("instructions", "cook"),
        ],
        file,
    );
    let response = app
        .clone()
        .oneshot(multipart_request("POST", "/api/recipes", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn list_recipes(app: &Router) -> ListRecipesResponse {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/recipes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn test_create_and_list() {
    let app = test_app();
    let created = create_recipe(&app, "Chocolate Cake", "flour\nsugar", None).await;

    assert_eq!(created.title, "Chocolate Cake");
    assert_eq!(created.ingredients, vec!["flour", "sugar"]);
    assert!(created.image_url.is_none());

    let listed = list_recipes(&app).await;
    assert_eq!(listed.recipes.len(), 1);
    assert_eq!(listed.recipes[0].id, created.id);
}

#[tokio::test]
async fn test_newest_recipe_is_listed_first() {
    let app = test_app();
    create_recipe(&app, "Older", "", None).await;
    let newest = create_recipe(&app, "Newest", "", None).await;

    let listed = list_recipes(&app).await;
    assert_eq!(listed.recipes[0].id, newest.id);
}

#[tokio::test]
async fn test_create_without_title_is_rejected() {
    let app = test_app();
    let body = multipart_body(&[("title", "   "), ("description", "x")], None);
    let response = app
        .clone()
        .oneshot(multipart_request("POST", "/api/recipes", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list_recipes(&app).await.recipes.is_empty());
}

#[tokio::test]
async fn test_create_with_disallowed_image_extension_is_rejected() {
    let app = test_app();
    let body = multipart_body(
        &[("title", "Pie")],
        Some(("notes.pdf", "application/pdf", b"%PDF-")),
    );
    let response = app
        .clone()
        .oneshot(multipart_request("POST", "/api/recipes", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list_recipes(&app).await.recipes.is_empty());
}

#[tokio::test]
async fn test_create_with_image_sets_image_url() {
    let app = test_app();
    let created = create_recipe(
        &app,
        "Pie",
        "apples",
        Some(("pie.png", "image/png", b"\x89PNG fake bytes")),
    )
    .await;

    let url = created.image_url.expect("image_url should be set");
    assert!(url.starts_with("/images/recipes/"));
    assert!(url.ends_with("_pie.png"));
}

#[tokio::test]
async fn test_get_unknown_recipe_is_404() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recipes/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = test_app();
    let created = create_recipe(&app, "Old", "flour", None).await;

    let body = multipart_body(
        &[
            ("title", "New"),
            ("description", "better"),
            ("ingredients", "flour\nbutter"),
            ("instructions", "bake"),
        ],
        None,
    );
    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/recipes/{}", created.id),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: RecipeResponse = json_body(response).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.ingredients, vec!["flour", "butter"]);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_unknown_recipe_is_404() {
    let app = test_app();
    let body = multipart_body(&[("title", "New")], None);
    let response = app
        .oneshot(multipart_request("PUT", "/api/recipes/missing", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_remove_image_clears_image_url() {
    let app = test_app();
    let created = create_recipe(
        &app,
        "Pie",
        "apples",
        Some(("pie.png", "image/png", b"\x89PNG fake bytes")),
    )
    .await;
    assert!(created.image_url.is_some());

    let body = multipart_body(
        &[("title", "Pie"), ("remove_image", "true")],
        None,
    );
    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/recipes/{}", created.id),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: RecipeResponse = json_body(response).await;
    assert!(updated.image_url.is_none());
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = test_app();
    let created = create_recipe(&app, "Once", "", None).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/recipes/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/recipes/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
