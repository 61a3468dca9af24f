//! The recipe repository: one contract, two backing stores.
//!
//! [`RecipeRepository`] is the interface the web layer programs against.
//! [`RecipeStore`] is its canonical implementation, composed from a
//! [`DocumentStore`] (recipe records) and an optional [`BlobStore`] (image
//! bytes). All rules that keep the two stores consistent live here, so both
//! the in-memory and the Postgres-backed adapters get identical behavior.

use crate::error::StorageError;
use crate::ingredients::parse_ingredients;
use crate::model::{ImageRef, ImageUpload, Recipe, RecipeDraft, RecipeUpdate};

/// Recipe fields as persisted by the document store. The store assigns the
/// ID and creation timestamp itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFields {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub image_blob_id: Option<String>,
}

/// Persistence of recipe records keyed by store-generated IDs.
///
/// Each mutation is atomic at single-document granularity; no guarantees are
/// made beyond what the underlying store offers.
pub trait DocumentStore {
    /// All recipes, newest first by creation timestamp.
    fn list(&self) -> Result<Vec<Recipe>, StorageError>;

    /// Fails with [`StorageError::NotFound`] when the ID is absent.
    fn get(&self, id: &str) -> Result<Recipe, StorageError>;

    /// Assigns an ID and creation timestamp, returns the persisted record.
    fn create(&self, fields: DocumentFields) -> Result<Recipe, StorageError>;

    /// Replaces every field except ID and creation timestamp. Fails with
    /// [`StorageError::NotFound`] when the ID is absent.
    fn update(&self, id: &str, fields: DocumentFields) -> Result<Recipe, StorageError>;

    /// Fails with [`StorageError::NotFound`] when the ID is absent.
    /// Documents are the authoritative existence signal, so unlike blob
    /// deletion this is not idempotent.
    fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Storage for image bytes, referenced by blob identifier.
pub trait BlobStore {
    /// Store the bytes under a fresh collision-resistant name derived from
    /// the suggested filename and return that name.
    fn upload(
        &self,
        data: &[u8],
        content_type: &str,
        filename: &str,
    ) -> Result<String, StorageError>;

    /// Derive a URL the image can currently be fetched from. Implementations
    /// with a signing key return a time-bounded signed URL; without one they
    /// fall back to a permanent public URL.
    fn resolve_url(&self, blob_id: &str) -> String;

    /// Idempotent: deleting an already-absent blob is success, because a
    /// crash between blob and document deletion may have removed it already.
    fn delete(&self, blob_id: &str) -> Result<(), StorageError>;
}

/// The contract consumed by the request handlers.
pub trait RecipeRepository: Send + Sync {
    fn list_recipes(&self) -> Result<Vec<Recipe>, StorageError>;
    fn get_recipe(&self, id: &str) -> Result<Recipe, StorageError>;
    fn add_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StorageError>;
    fn update_recipe(&self, id: &str, update: RecipeUpdate) -> Result<Recipe, StorageError>;
    fn delete_recipe(&self, id: &str) -> Result<(), StorageError>;
}

/// Repository composed from a document store and an optional blob store.
///
/// Without a blob store the repository still works; supplying an image then
/// fails with [`StorageError::StorageUnavailable`] before anything is
/// written.
#[derive(Debug)]
pub struct RecipeStore<D, B> {
    documents: D,
    blobs: Option<B>,
}

impl<D, B> RecipeStore<D, B>
where
    D: DocumentStore + Send + Sync,
    B: BlobStore + Send + Sync,
{
    pub fn new(documents: D, blobs: Option<B>) -> Self {
        Self { documents, blobs }
    }

    /// Upload an image payload, or fail when no blob store is configured.
    /// Nothing has been written to the document store yet when this fails.
    fn upload_image(&self, image: &ImageUpload) -> Result<ImageRef, StorageError> {
        let blobs = self.blobs.as_ref().ok_or(StorageError::StorageUnavailable)?;
        let blob_id = blobs.upload(&image.data, &image.content_type, &image.filename)?;
        let url = blobs.resolve_url(&blob_id);
        Ok(ImageRef { url, blob_id })
    }

    /// Stored signed URLs go stale, so displayed URLs are re-derived from
    /// the blob identifier at read time whenever a blob store is available.
    fn refresh_url(&self, mut recipe: Recipe) -> Recipe {
        if let (Some(blobs), Some(image)) = (self.blobs.as_ref(), recipe.image.as_mut()) {
            image.url = blobs.resolve_url(&image.blob_id);
        }
        recipe
    }

    fn validate_title(title: &str) -> Result<(), StorageError> {
        if title.trim().is_empty() {
            return Err(StorageError::Validation(
                "a recipe title is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl<D, B> RecipeRepository for RecipeStore<D, B>
where
    D: DocumentStore + Send + Sync,
    B: BlobStore + Send + Sync,
{
    fn list_recipes(&self) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.documents.list()?;
        Ok(recipes.into_iter().map(|r| self.refresh_url(r)).collect())
    }

    fn get_recipe(&self, id: &str) -> Result<Recipe, StorageError> {
        let recipe = self.documents.get(id)?;
        Ok(self.refresh_url(recipe))
    }

    fn add_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        Self::validate_title(&draft.title)?;

        // Upload before creating the document: a failed upload must not
        // leave a document referencing a nonexistent blob.
        let image = match &draft.image {
            Some(upload) => Some(self.upload_image(upload)?),
            None => None,
        };
        let (image_url, image_blob_id) = match image {
            Some(ImageRef { url, blob_id }) => (Some(url), Some(blob_id)),
            None => (None, None),
        };

        self.documents.create(DocumentFields {
            title: draft.title,
            description: draft.description,
            ingredients: parse_ingredients(&draft.ingredients_text),
            instructions: draft.instructions,
            image_url,
            image_blob_id,
        })
    }

    fn update_recipe(&self, id: &str, update: RecipeUpdate) -> Result<Recipe, StorageError> {
        Self::validate_title(&update.title)?;

        let current = self.documents.get(id)?;

        // Three mutually exclusive image branches: replace, remove, keep.
        let image = if let Some(upload) = &update.image {
            let new_image = self.upload_image(upload)?;
            if let (Some(blobs), Some(old)) = (self.blobs.as_ref(), &current.image) {
                // Old-blob cleanup must not prevent the document update; at
                // worst a failed delete leaves an orphan blob behind.
                if let Err(e) = blobs.delete(&old.blob_id) {
                    tracing::warn!(
                        blob_id = %old.blob_id,
                        "failed to delete replaced image blob: {}",
                        e
                    );
                }
            }
            Some(new_image)
        } else if update.remove_image {
            if let (Some(blobs), Some(old)) = (self.blobs.as_ref(), &current.image) {
                blobs.delete(&old.blob_id)?;
            }
            None
        } else {
            current.image
        };
        let (image_url, image_blob_id) = match image {
            Some(ImageRef { url, blob_id }) => (Some(url), Some(blob_id)),
            None => (None, None),
        };

        self.documents.update(
            id,
            DocumentFields {
                title: update.title,
                description: update.description,
                ingredients: parse_ingredients(&update.ingredients_text),
                instructions: update.instructions,
                image_url,
                image_blob_id,
            },
        )
    }

    fn delete_recipe(&self, id: &str) -> Result<(), StorageError> {
        let recipe = self.documents.get(id)?;

        // Blob first: a crash here leaves at worst an orphan blob, never a
        // document pointing at a deleted image.
        if let (Some(blobs), Some(image)) = (self.blobs.as_ref(), &recipe.image) {
            blobs.delete(&image.blob_id)?;
        }

        self.documents.delete(id)
    }
}
