pub mod create;
pub mod delete;
pub mod form;
pub mod get;
pub mod list;
pub mod update;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use receptsamling_core::{Recipe, RecipeRepository};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// State shared by the recipe handlers: the repository contract, with the
/// concrete backend chosen at startup.
pub type RepositoryState = Arc<dyn RecipeRepository>;

/// Returns the router for recipe endpoints (mounted at /api/recipes)
pub fn router() -> Router<RepositoryState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// URL the recipe image can currently be fetched from, if any.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            image_url: recipe.image.map(|image| image.url),
            created_at: recipe.created_at,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        RecipeResponse,
        create::CreateRecipeRequest,
        list::ListRecipesResponse,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;
