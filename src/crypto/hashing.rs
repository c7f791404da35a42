// Content digests for seeded collections.

use crate::domain::model::{Collection, Document, ID_FIELD};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

// Domain separation so a digest of one collection never matches another's.
const COLLECTION_DOMAIN: &[u8] = b"LIBSEED-COLLECTION";
const RECORD_SEPARATOR: &[u8] = b"\n";

/// Returns `value` with every object's keys sorted recursively.
pub fn canonical_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted_map: BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), canonical_json(v)))
                .collect();
            Value::Object(sorted_map.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(canonical_json).collect()),
        _ => value.clone(),
    }
}

/// Hashes the content of a collection, independent of the identifiers it was given.
///
/// `_id` and the collection's reference fields are left out, so two runs of the
/// same dataset produce the same digest. Document order is significant.
pub fn content_digest(collection: Collection, documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(COLLECTION_DOMAIN);
    hasher.update(collection.name().as_bytes());

    for document in documents {
        let mut content = document.clone();
        content.remove(ID_FIELD);
        for (field, _) in collection.reference_fields() {
            content.remove(*field);
        }
        let canonical = canonical_json(&Value::Object(content));
        hasher.update(RECORD_SEPARATOR);
        hasher.update(canonical.to_string().as_bytes());
    }

    hex::encode(hasher.finalize())
}
