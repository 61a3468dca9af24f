//! In-memory document and blob stores.
//!
//! Test doubles for the Postgres-backed adapters, also usable as an offline
//! development backend. Behavior mirrors the durable stores: generated IDs,
//! newest-first listing, idempotent blob deletion.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StorageError;
use crate::model::{ImageRef, Recipe};
use crate::naming::build_blob_name;
use crate::repository::{BlobStore, DocumentFields, DocumentStore};

#[derive(Debug, Clone)]
struct StoredDocument {
    /// Insertion order, breaks created-at ties deterministically.
    seq: u64,
    recipe: Recipe,
}

#[derive(Debug, Default)]
struct DocumentsInner {
    documents: HashMap<String, StoredDocument>,
    next_seq: u64,
    last_created_at: Option<DateTime<Utc>>,
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<DocumentsInner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn fields_to_image(fields: &DocumentFields) -> Option<ImageRef> {
    match (&fields.image_url, &fields.image_blob_id) {
        (Some(url), Some(blob_id)) => Some(ImageRef {
            url: url.clone(),
            blob_id: blob_id.clone(),
        }),
        _ => None,
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let inner = self.inner.read().unwrap();
        let mut stored: Vec<&StoredDocument> = inner.documents.values().collect();
        stored.sort_by(|a, b| {
            (b.recipe.created_at, b.seq).cmp(&(a.recipe.created_at, a.seq))
        });
        Ok(stored.into_iter().map(|s| s.recipe.clone()).collect())
    }

    fn get(&self, id: &str) -> Result<Recipe, StorageError> {
        let inner = self.inner.read().unwrap();
        inner
            .documents
            .get(id)
            .map(|s| s.recipe.clone())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn create(&self, fields: DocumentFields) -> Result<Recipe, StorageError> {
        let mut inner = self.inner.write().unwrap();

        // Keep created-at non-decreasing with insertion order even if the
        // wall clock steps backwards.
        let now = Utc::now();
        let created_at = match inner.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        inner.last_created_at = Some(created_at);

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let recipe = Recipe {
            id: Uuid::new_v4().simple().to_string(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            ingredients: fields.ingredients.clone(),
            instructions: fields.instructions.clone(),
            image: fields_to_image(&fields),
            created_at,
        };
        inner
            .documents
            .insert(recipe.id.clone(), StoredDocument { seq, recipe: recipe.clone() });
        Ok(recipe)
    }

    fn update(&self, id: &str, fields: DocumentFields) -> Result<Recipe, StorageError> {
        let mut inner = self.inner.write().unwrap();
        let stored = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        stored.recipe.title = fields.title.clone();
        stored.recipe.description = fields.description.clone();
        stored.recipe.ingredients = fields.ingredients.clone();
        stored.recipe.instructions = fields.instructions.clone();
        stored.recipe.image = fields_to_image(&fields);
        Ok(stored.recipe.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap();
        inner
            .documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: String,
    data: Vec<u8>,
}

/// In-memory [`BlobStore`]. URLs resolve to the server's image route so the
/// double can stand in for the durable store behind the same handlers.
#[derive(Debug)]
pub struct MemoryBlobStore {
    namespace: String,
    fail_uploads: bool,
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            fail_uploads: false,
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// A store whose uploads always fail, for exercising abort paths.
    pub fn with_failing_uploads(namespace: &str) -> Self {
        Self {
            fail_uploads: true,
            ..Self::new(namespace)
        }
    }

    /// Whether a blob with this identifier currently exists.
    pub fn contains(&self, blob_id: &str) -> bool {
        self.blobs.read().unwrap().contains_key(blob_id)
    }

    /// The stored content type and bytes, if present.
    pub fn fetch(&self, blob_id: &str) -> Option<(String, Vec<u8>)> {
        self.blobs
            .read()
            .unwrap()
            .get(blob_id)
            .map(|b| (b.content_type.clone(), b.data.clone()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload(
        &self,
        data: &[u8],
        content_type: &str,
        filename: &str,
    ) -> Result<String, StorageError> {
        if self.fail_uploads {
            return Err(StorageError::Backend(
                "simulated upload failure".to_string(),
            ));
        }
        let name = build_blob_name(&self.namespace, filename);
        self.blobs.write().unwrap().insert(
            name.clone(),
            StoredBlob {
                content_type: content_type.to_string(),
                data: data.to_vec(),
            },
        );
        Ok(name)
    }

    fn resolve_url(&self, blob_id: &str) -> String {
        format!("/images/{}", blob_id)
    }

    fn delete(&self, blob_id: &str) -> Result<(), StorageError> {
        // Already absent is fine.
        self.blobs.write().unwrap().remove(blob_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> DocumentFields {
        DocumentFields {
            title: title.to_string(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: String::new(),
            image_url: None,
            image_blob_id: None,
        }
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.create(fields("a")).unwrap();
        let b = store.create(fields("b")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_created_at_is_non_decreasing() {
        let store = MemoryDocumentStore::new();
        let mut previous = None;
        for i in 0..10 {
            let recipe = store.create(fields(&format!("r{}", i))).unwrap();
            if let Some(prev) = previous {
                assert!(recipe.created_at >= prev);
            }
            previous = Some(recipe.created_at);
        }
    }

    #[test]
    fn test_partial_image_fields_are_treated_as_absent() {
        let store = MemoryDocumentStore::new();
        let mut f = fields("a");
        f.image_url = Some("/images/recipes/x_y.png".to_string());
        // blob id missing: the reference is not fully present
        let recipe = store.create(f).unwrap();
        assert!(recipe.image.is_none());
    }

    #[test]
    fn test_blob_delete_is_idempotent() {
        let store = MemoryBlobStore::new("recipes");
        let id = store.upload(b"bytes", "image/png", "a.png").unwrap();
        store.delete(&id).unwrap();
        store.delete(&id).unwrap();
        assert!(!store.contains(&id));
    }

    #[test]
    fn test_upload_stores_bytes_and_content_type() {
        let store = MemoryBlobStore::new("recipes");
        let id = store.upload(b"bytes", "image/png", "a.png").unwrap();
        assert_eq!(
            store.fetch(&id),
            Some(("image/png".to_string(), b"bytes".to_vec()))
        );
    }
}
