use crate::api::recipes::form::RecipeForm;
use crate::api::recipes::{RecipeResponse, RepositoryState};
use crate::api::{storage_error, ErrorResponse};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use receptsamling_core::RecipeDraft;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    /// Free text, one ingredient per line
    pub ingredients: String,
    pub instructions: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(content_type = "multipart/form-data", content = CreateRecipeRequest),
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "Image storage unavailable", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(repository): State<RepositoryState>,
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

    let draft = RecipeDraft {
        title: form.title,
        description: form.description,
        ingredients_text: form.ingredients,
        instructions: form.instructions,
        image: form.image,
    };

    match repository.add_recipe(draft) {
        Ok(recipe) => {
            (StatusCode::CREATED, Json(RecipeResponse::from(recipe))).into_response()
        }
        Err(e) => storage_error(e),
    }
}
