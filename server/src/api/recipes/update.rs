use crate::api::recipes::form::RecipeForm;
use crate::api::recipes::{RecipeResponse, RepositoryState};
use crate::api::{storage_error, ErrorResponse};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use receptsamling_core::RecipeUpdate;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateRecipeRequest {
    pub title: String,
    pub description: String,
    /// Free text, one ingredient per line
    pub ingredients: String,
    pub instructions: String,
    /// Replacement image. Takes precedence over `remove_image`.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
    /// Set to "true" to drop the existing image
    pub remove_image: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UpdateRecipeRequest),
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 503, description = "Image storage unavailable", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(repository): State<RepositoryState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match RecipeForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                .into_response()
        }
    };

    if form.title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please provide a recipe title.".to_string(),
            }),
        )
            .into_response();
    }

    let update = RecipeUpdate {
        title: form.title,
        description: form.description,
        ingredients_text: form.ingredients,
        instructions: form.instructions,
        image: form.image,
        remove_image: form.remove_image,
    };

    match repository.update_recipe(&id, update) {
        Ok(recipe) => Json(RecipeResponse::from(recipe)).into_response(),
        Err(e) => storage_error(e),
    }
}
