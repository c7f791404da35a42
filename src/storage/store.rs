//! Storage seam for the seed loader.

use crate::domain::model::{Collection, Document, RecordId, ID_FIELD};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate key in '{collection}': {detail}")]
    DuplicateKey {
        collection: Collection,
        detail: String,
    },

    #[error("Malformed document in '{collection}': {reason}")]
    Malformed {
        collection: Collection,
        reason: String,
    },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// A document store holding the four library collections.
///
/// Implementations keep documents in insertion order and enforce uniqueness of
/// `_id` plus `Collection::unique_fields`. Nothing else is validated.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Removes every record of `collection`. Succeeds when the collection is absent.
    async fn drop_collection(&self, collection: Collection) -> Result<(), StoreError>;

    /// Inserts `documents` in order and returns their identifiers in the same order.
    ///
    /// Documents without `_id` get a generated one. A failing call inserts nothing,
    /// but earlier calls stay applied.
    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<Vec<RecordId>, StoreError>;

    /// All documents of `collection` in insertion order, `_id` included.
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;
}

/// Removes `_id` from `document` and returns it, generating one when absent.
pub(crate) fn take_id(
    collection: Collection,
    document: &mut Document,
) -> Result<RecordId, StoreError> {
    match document.remove(ID_FIELD) {
        None | Some(JsonValue::Null) => Ok(RecordId::generate()),
        Some(JsonValue::String(s)) if !s.is_empty() => Ok(RecordId::from_raw(s)),
        Some(other) => Err(StoreError::Malformed {
            collection,
            reason: format!("_id must be a non-empty string, got {}", other),
        }),
    }
}

/// Renders the value of a unique field for duplicate detection.
pub(crate) fn unique_value(document: &Document, field: &str) -> Option<String> {
    match document.get(field)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
