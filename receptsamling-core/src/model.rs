use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to an uploaded image. The URL and the blob identifier are
/// always set together; a recipe without an image has no `ImageRef` at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// URL the image can be fetched from (possibly signed, see `signing`).
    pub url: String,
    /// Identifier of the blob inside the blob store.
    pub blob_id: String,
}

/// Domain object representing a stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier, immutable after creation.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered, trimmed, never contains blank entries.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image: Option<ImageRef>,
    /// Server-assigned at creation, used for newest-first ordering.
    pub created_at: DateTime<Utc>,
}

/// An image payload supplied with an add or update request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

/// Fields for a new recipe, before the store assigns an ID and timestamp.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    /// Free text, one ingredient per line. Blank lines are discarded.
    pub ingredients_text: String,
    pub instructions: String,
    pub image: Option<ImageUpload>,
}

/// Replacement fields for an existing recipe. Every field except the ID and
/// creation timestamp is overwritten; the image is handled according to
/// `image` / `remove_image` (see `RecipeStore::update_recipe`).
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub title: String,
    pub description: String,
    pub ingredients_text: String,
    pub instructions: String,
    /// Replacement image, if any.
    pub image: Option<ImageUpload>,
    /// Explicit intent to drop the existing image. Ignored when a new
    /// payload is supplied.
    pub remove_image: bool,
}
