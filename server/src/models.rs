use chrono::{DateTime, Utc};
use diesel::prelude::*;
use receptsamling_core::{ImageRef, Recipe};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Option<String>>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub image_blob_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecipeRow {
    /// Convert a database row into the domain type. The image reference is
    /// only considered present when both columns are set.
    pub fn into_recipe(self) -> Recipe {
        let image = match (self.image_url, self.image_blob_id) {
            (Some(url), Some(blob_id)) => Some(ImageRef { url, blob_id }),
            _ => None,
        };
        Recipe {
            id: self.id.to_string(),
            title: self.title,
            description: self.description,
            ingredients: self.ingredients.into_iter().flatten().collect(),
            instructions: self.instructions,
            image,
            created_at: self.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: &'a [Option<String>],
    pub instructions: &'a str,
    pub image_url: Option<&'a str>,
    pub image_blob_id: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::image_blobs)]
pub struct NewBlobRow<'a> {
    pub name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}
