use crate::api::recipes::{RecipeResponse, RepositoryState};
use crate::api::{storage_error, ErrorResponse};
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes, newest first", body = ListRecipesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(repository): State<RepositoryState>) -> impl IntoResponse {
    match repository.list_recipes() {
        Ok(recipes) => Json(ListRecipesResponse {
            recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
        })
        .into_response(),
        Err(e) => storage_error(e),
    }
}
