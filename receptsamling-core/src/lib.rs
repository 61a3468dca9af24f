pub mod error;
pub mod ingredients;
pub mod memory;
pub mod model;
pub mod naming;
pub mod repository;
pub mod signing;

pub use error::StorageError;
pub use ingredients::parse_ingredients;
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
pub use model::{ImageRef, ImageUpload, Recipe, RecipeDraft, RecipeUpdate};
pub use repository::{
    BlobStore, DocumentFields, DocumentStore, RecipeRepository, RecipeStore,
};
pub use signing::{UrlSigner, SIGNED_URL_TTL_SECS};
