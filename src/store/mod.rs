//! Document store seam.
//!
//! The application only depends on this collection/document/query contract,
//! not on any specific storage engine. [`MemoryStore`] implements it for
//! tests and local runs; a managed document database slots in behind the
//! same trait.

pub mod memory;
pub mod query;

pub use memory::MemoryStore;
pub use query::{Direction, Filter, Query};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;

/// Field map of a stored document, JSON-shaped.
pub type Fields = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("invalid document shape: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<StoreError> for crate::utils::errors::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::not_found(err.to_string()),
            other => Self::internal(other),
        }
    }
}

/// A document returned by the store: id plus field data.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    /// Deserialize the field data into a typed model.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            self.data.clone(),
        ))?)
    }

    /// Deserialize into a typed model tagged with the document id.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<WithId<T>, StoreError> {
        let inner = serde_json::from_value(serde_json::Value::Object(self.data))?;
        Ok(WithId { id: self.id, inner })
    }
}

/// Serialize a model into document field data.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(anyhow::anyhow!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// A typed document together with its store id, serialized as
/// `{ "id": ..., ...fields }` the way the API has always returned it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WithId<T> {
    pub id: String,
    #[serde(flatten)]
    pub inner: T,
}

/// Collection/document/query primitives of an ordered document store.
///
/// `run_query` returns documents matching every filter, ordered by the
/// requested field with the document id as secondary sort key, optionally
/// resuming after a prior document and capped at a limit.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document under an explicit id.
    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<(), StoreError>;

    /// Create a document under a generated id; returns the id.
    async fn add(&self, collection: &str, data: Fields) -> Result<String, StoreError>;

    /// Merge the patch into an existing document. Fails with
    /// [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn run_query(&self, collection: &str, query: &Query)
    -> Result<Vec<Document>, StoreError>;
}
