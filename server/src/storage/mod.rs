//! Durable, Postgres-backed implementations of the storage adapters.

pub mod blobs;
pub mod postgres;

pub use blobs::PgBlobStore;
pub use postgres::PgDocumentStore;
