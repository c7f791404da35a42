//! In-process document store, used for dry runs and tests.

use crate::domain::model::{Collection, Document, RecordId, ID_FIELD};
use crate::storage::store::{take_id, unique_value, DocumentStore, StoreError};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<(RecordId, Document)>>>,
    failing: Mutex<HashSet<Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later insert into `collection` fail with `StoreError::Unavailable`.
    pub async fn fail_inserts_into(&self, collection: Collection) {
        self.failing.lock().await.insert(collection);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn drop_collection(&self, collection: Collection) -> Result<(), StoreError> {
        self.collections.lock().await.remove(&collection);
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<Vec<RecordId>, StoreError> {
        if self.failing.lock().await.contains(&collection) {
            return Err(StoreError::Unavailable(format!(
                "inserts into '{}' are disabled",
                collection
            )));
        }

        let mut collections = self.collections.lock().await;
        let existing = collections.entry(collection).or_default();

        let mut seen_ids: HashSet<RecordId> = existing.iter().map(|(id, _)| id.clone()).collect();
        let mut seen_unique: HashMap<&str, HashSet<String>> = collection
            .unique_fields()
            .iter()
            .map(|field| {
                let values = existing
                    .iter()
                    .filter_map(|(_, doc)| unique_value(doc, field))
                    .collect();
                (*field, values)
            })
            .collect();

        // Validate the whole batch before touching the collection.
        let mut staged = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = take_id(collection, &mut document)?;
            if !seen_ids.insert(id.clone()) {
                return Err(StoreError::DuplicateKey {
                    collection,
                    detail: format!("{} = {}", ID_FIELD, id),
                });
            }
            for field in collection.unique_fields() {
                if let Some(value) = unique_value(&document, field) {
                    let values = seen_unique.entry(*field).or_default();
                    if !values.insert(value.clone()) {
                        return Err(StoreError::DuplicateKey {
                            collection,
                            detail: format!("{} = {}", field, value),
                        });
                    }
                }
            }
            staged.push((id, document));
        }

        let ids = staged.iter().map(|(id, _)| id.clone()).collect();
        existing.extend(staged);
        Ok(ids)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let docs: Vec<Document> = collections
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .map(|(id, doc)| {
                        let mut out = doc.clone();
                        out.insert(ID_FIELD.to_string(), JsonValue::String(id.to_string()));
                        out
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let collections = self.collections.lock().await;
        Ok(collections.get(&collection).map_or(0, |rows| rows.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: JsonValue) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn drop_is_idempotent_on_missing_collection() {
        let store = MemoryStore::new();
        store.drop_collection(Collection::Loans).await.unwrap();
        store.drop_collection(Collection::Loans).await.unwrap();
        assert_eq!(store.count(Collection::Loans).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_keeps_order_and_returns_ids() {
        let store = MemoryStore::new();
        let ids = store
            .insert_many(
                Collection::Authors,
                vec![
                    doc(json!({"last_name": "Orwell"})),
                    doc(json!({"_id": "a2", "last_name": "Austen"})),
                ],
            )
            .await
            .unwrap();
        assert_eq!(ids[1].as_str(), "a2");

        let docs = store.find_all(Collection::Authors).await.unwrap();
        assert_eq!(docs[0]["last_name"], json!("Orwell"));
        assert_eq!(docs[0]["_id"], json!(ids[0].as_str()));
        assert_eq!(docs[1]["_id"], json!("a2"));
    }

    #[tokio::test]
    async fn duplicate_membership_number_rejects_whole_batch() {
        let store = MemoryStore::new();
        store
            .insert_many(Collection::Adherents, vec![doc(json!({"membership_number": "MEM001"}))])
            .await
            .unwrap();

        let err = store
            .insert_many(
                Collection::Adherents,
                vec![
                    doc(json!({"membership_number": "MEM002"})),
                    doc(json!({"membership_number": "MEM001"})),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateKey {
                collection: Collection::Adherents,
                ..
            }
        ));
        assert_eq!(store.count(Collection::Adherents).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_supplied_id_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .insert_many(
                Collection::Books,
                vec![doc(json!({"_id": "6"})), doc(json!({"_id": "6"}))],
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("_id = 6"));
    }

    #[tokio::test]
    async fn failing_collection_reports_unavailable() {
        let store = MemoryStore::new();
        store.fail_inserts_into(Collection::Loans).await;
        let err = store
            .insert_many(Collection::Loans, vec![doc(json!({}))])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
