//! Postgres-backed blob store.
//!
//! Image bytes are stored in the `image_blobs` table keyed by their
//! collision-resistant name and served back through `/images/{blob_id}`.
//! With a signing key configured, resolved URLs carry an HMAC signature
//! valid for seven days; without one they are plain public URLs.

use chrono::Utc;
use diesel::prelude::*;
use receptsamling_core::naming::build_blob_name;
use receptsamling_core::{BlobStore, StorageError, UrlSigner};

use crate::db::DbPool;
use crate::models::NewBlobRow;
use crate::schema::image_blobs;

pub struct PgBlobStore {
    pool: DbPool,
    namespace: String,
    signer: Option<UrlSigner>,
}

impl PgBlobStore {
    pub fn new(pool: DbPool, namespace: String, signer: Option<UrlSigner>) -> Self {
        Self {
            pool,
            namespace,
            signer,
        }
    }
}

impl BlobStore for PgBlobStore {
    fn upload(
        &self,
        data: &[u8],
        content_type: &str,
        filename: &str,
    ) -> Result<String, StorageError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let name = build_blob_name(&self.namespace, filename);
        diesel::insert_into(image_blobs::table)
            .values(&NewBlobRow {
                name: &name,
                content_type,
                data,
            })
            .execute(&mut conn)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(name)
    }

    fn resolve_url(&self, blob_id: &str) -> String {
        match &self.signer {
            Some(signer) => format!(
                "/images/{}?{}",
                blob_id,
                signer.signed_query(blob_id, Utc::now())
            ),
            None => format!("/images/{}", blob_id),
        }
    }

    fn delete(&self, blob_id: &str) -> Result<(), StorageError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        // Zero rows deleted means the blob was already gone, which is fine.
        diesel::delete(image_blobs::table.filter(image_blobs::name.eq(blob_id)))
            .execute(&mut conn)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}
