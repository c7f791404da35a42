//! Record model for the library collections.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

pub mod collection;
pub mod entities;
pub mod id;

pub use collection::Collection;
pub use entities::{Adherent, Author, Book, Loan, Role};
pub use id::{IdMap, RecordId};

/// Name of the identifier field carried by every stored document.
pub const ID_FIELD: &str = "_id";

/// A stored record: a JSON object keyed by field name.
pub type Document = Map<String, JsonValue>;

/// Serializes a typed record into a document ready for insertion.
///
/// The returned document carries no `_id`, so the store assigns one.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(record)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record must serialize to an object, got {}",
            other
        ))),
    }
}

/// Reads the `_id` of a stored document, if it is a string.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }

    #[test]
    fn document_id_reads_string_ids_only() {
        let with_id = to_document(&json!({"_id": "abc"})).unwrap();
        let numeric = to_document(&json!({"_id": 7})).unwrap();
        assert_eq!(document_id(&with_id), Some("abc"));
        assert_eq!(document_id(&numeric), None);
    }
}
