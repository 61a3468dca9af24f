//! Postgres-backed document store.
//!
//! Recipes live in a single `recipes` table; Postgres assigns the ID
//! (`gen_random_uuid()`) and creation timestamp (`now()`), which keeps
//! created-at non-decreasing with insertion order. Each operation is a
//! single statement, so mutations are atomic at document granularity.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use receptsamling_core::{DocumentFields, DocumentStore, Recipe, StorageError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewRecipeRow, RecipeRow};
use crate::schema::recipes;

pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StorageError> {
        self.pool
            .get()
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

/// An ID that is not a UUID cannot name any stored recipe.
fn parse_id(id: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(id).map_err(|_| StorageError::NotFound(id.to_string()))
}

fn backend(e: diesel::result::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

fn not_found_or_backend(id: &str, e: diesel::result::Error) -> StorageError {
    match e {
        diesel::result::Error::NotFound => StorageError::NotFound(id.to_string()),
        other => backend(other),
    }
}

fn wrap_ingredients(ingredients: &[String]) -> Vec<Option<String>> {
    ingredients.iter().cloned().map(Some).collect()
}

impl DocumentStore for PgDocumentStore {
    fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let mut conn = self.conn()?;
        let rows: Vec<RecipeRow> = recipes::table
            .order(recipes::created_at.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(backend)?;
        Ok(rows.into_iter().map(RecipeRow::into_recipe).collect())
    }

    fn get(&self, id: &str) -> Result<Recipe, StorageError> {
        let uuid = parse_id(id)?;
        let mut conn = self.conn()?;
        let row: RecipeRow = recipes::table
            .find(uuid)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .map_err(|e| not_found_or_backend(id, e))?;
        Ok(row.into_recipe())
    }

    fn create(&self, fields: DocumentFields) -> Result<Recipe, StorageError> {
        let mut conn = self.conn()?;
        let ingredients = wrap_ingredients(&fields.ingredients);
        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(&NewRecipeRow {
                title: &fields.title,
                description: &fields.description,
                ingredients: &ingredients,
                instructions: &fields.instructions,
                image_url: fields.image_url.as_deref(),
                image_blob_id: fields.image_blob_id.as_deref(),
            })
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .map_err(backend)?;
        Ok(row.into_recipe())
    }

    fn update(&self, id: &str, fields: DocumentFields) -> Result<Recipe, StorageError> {
        let uuid = parse_id(id)?;
        let mut conn = self.conn()?;
        let ingredients = wrap_ingredients(&fields.ingredients);
        let row: RecipeRow = diesel::update(recipes::table.find(uuid))
            .set((
                recipes::title.eq(&fields.title),
                recipes::description.eq(&fields.description),
                recipes::ingredients.eq(&ingredients),
                recipes::instructions.eq(&fields.instructions),
                recipes::image_url.eq(fields.image_url.as_deref()),
                recipes::image_blob_id.eq(fields.image_blob_id.as_deref()),
            ))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| not_found_or_backend(id, e))?;
        Ok(row.into_recipe())
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        let uuid = parse_id(id)?;
        let mut conn = self.conn()?;
        let deleted = diesel::delete(recipes::table.find(uuid))
            .execute(&mut conn)
            .map_err(backend)?;
        if deleted == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
