use crate::api::recipes::{RecipeResponse, RepositoryState};
use crate::api::{storage_error, ErrorResponse};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(repository): State<RepositoryState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match repository.get_recipe(&id) {
        Ok(recipe) => Json(RecipeResponse::from(recipe)).into_response(),
        Err(e) => storage_error(e),
    }
}
