//! Persistence boundary for the `solicitudes` document collection.
//!
//! [`SolicitudGateway`] owns the request-level semantics (status defaulting,
//! creation timestamps, immutable-field stripping, kind-filtered listings) on
//! top of a raw [`DocumentCollection`]. The in-process [`MemoryCollection`] is
//! the default backend; any document database satisfying the trait can stand
//! in for it.

pub mod gateway;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use gateway::SolicitudGateway;
pub use memory::MemoryCollection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    Missing(String),

    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// A keyed collection of JSON documents. Each write of a single document is
/// atomic; nothing here promises multi-document transactions.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Stores a new document under a freshly generated opaque id.
    async fn insert(&self, doc: Value) -> Result<String, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError>;

    /// Overwrites an existing document. Fails with [`StoreError::Missing`]
    /// when the id is unknown.
    async fn replace(&self, id: &str, doc: Value) -> Result<(), StoreError>;

    /// Removes a document. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn scan(&self) -> Result<Vec<(String, Value)>, StoreError>;
}
