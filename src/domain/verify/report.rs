use crate::crypto::hashing::content_digest;
use crate::domain::model::{document_id, Collection, Document, ID_FIELD};
use crate::storage::store::unique_value;
use crate::storage::{DocumentStore, StoreError};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub collection: Collection,
    pub count: u64,
    /// Hex SHA-256 of the collection content, identifiers excluded.
    pub digest: String,
}

/// A reference field whose value matches no record of the target collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub collection: Collection,
    pub record_id: String,
    pub field: &'static str,
    pub target: Collection,
    /// `None` when the field is missing or not a string.
    pub value: Option<String>,
}

/// A value shared by several records in a field that should be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateValue {
    pub collection: Collection,
    pub field: &'static str,
    pub value: String,
    pub occurrences: usize,
}

/// Counts, digests and reference checks for the four collections.
///
/// The store does not enforce references; this report only observes them.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub collections: Vec<CollectionSummary>,
    pub dangling: Vec<DanglingReference>,
    pub duplicates: Vec<DuplicateValue>,
}

impl SeedReport {
    pub async fn collect<S: DocumentStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let mut contents: BTreeMap<Collection, Vec<Document>> = BTreeMap::new();
        for collection in Collection::ALL {
            contents.insert(collection, store.find_all(collection).await?);
        }
        Ok(Self::from_documents(&contents))
    }

    /// Builds the report from documents already read back.
    pub fn from_documents(contents: &BTreeMap<Collection, Vec<Document>>) -> Self {
        let empty = Vec::new();
        let docs = |c: Collection| contents.get(&c).unwrap_or(&empty);

        let ids: HashMap<Collection, HashSet<&str>> = Collection::ALL
            .into_iter()
            .map(|c| (c, docs(c).iter().filter_map(document_id).collect()))
            .collect();

        let collections = Collection::ALL
            .into_iter()
            .map(|c| CollectionSummary {
                collection: c,
                count: docs(c).len() as u64,
                digest: content_digest(c, docs(c)),
            })
            .collect();

        let mut dangling = Vec::new();
        for collection in Collection::ALL {
            for (field, target) in collection.reference_fields() {
                for document in docs(collection) {
                    let value = document.get(*field).and_then(JsonValue::as_str);
                    let resolved = value.is_some_and(|v| ids[target].contains(v));
                    if !resolved {
                        dangling.push(DanglingReference {
                            collection,
                            record_id: document_id(document).unwrap_or_default().to_string(),
                            field: *field,
                            target: *target,
                            value: value.map(str::to_string),
                        });
                    }
                }
            }
        }

        let mut duplicates = Vec::new();
        for collection in Collection::ALL {
            let fields = std::iter::once(ID_FIELD).chain(collection.unique_fields().iter().copied());
            for field in fields {
                let mut seen: BTreeMap<String, usize> = BTreeMap::new();
                for document in docs(collection) {
                    if let Some(value) = unique_value(document, field) {
                        *seen.entry(value).or_default() += 1;
                    }
                }
                duplicates.extend(seen.into_iter().filter(|(_, n)| *n > 1).map(
                    |(value, occurrences)| DuplicateValue {
                        collection,
                        field,
                        value,
                        occurrences,
                    },
                ));
            }
        }

        Self {
            collections,
            dangling,
            duplicates,
        }
    }

    pub fn count(&self, collection: Collection) -> u64 {
        self.summary(collection).map_or(0, |s| s.count)
    }

    pub fn digest(&self, collection: Collection) -> Option<&str> {
        self.summary(collection).map(|s| s.digest.as_str())
    }

    /// True when every reference resolves and no unique field repeats.
    pub fn is_consistent(&self) -> bool {
        self.dangling.is_empty() && self.duplicates.is_empty()
    }

    fn summary(&self, collection: Collection) -> Option<&CollectionSummary> {
        self.collections.iter().find(|s| s.collection == collection)
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.collections {
            writeln!(
                f,
                "  {:<10} {:>4} records  digest={}",
                s.collection.name(),
                s.count,
                s.digest.get(..16).unwrap_or(&s.digest)
            )?;
        }
        for d in &self.dangling {
            writeln!(
                f,
                "  dangling: {}[{}].{} = {} (no such {})",
                d.collection,
                d.record_id,
                d.field,
                d.value.as_deref().unwrap_or("<missing>"),
                d.target
            )?;
        }
        for d in &self.duplicates {
            writeln!(
                f,
                "  duplicate: {}.{} = {} ({} records)",
                d.collection, d.field, d.value, d.occurrences
            )?;
        }
        write!(
            f,
            "  consistent: {}",
            if self.is_consistent() { "yes" } else { "no" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: JsonValue) -> Document {
        v.as_object().cloned().unwrap()
    }

    fn contents() -> BTreeMap<Collection, Vec<Document>> {
        let mut m = BTreeMap::new();
        m.insert(Collection::Authors, vec![doc(json!({"_id": "a1"}))]);
        m.insert(
            Collection::Books,
            vec![
                doc(json!({"_id": "b1", "author_id": "a1"})),
                doc(json!({"_id": "b2", "author_id": "6"})),
            ],
        );
        m.insert(
            Collection::Adherents,
            vec![
                doc(json!({"_id": "m1", "membership_number": "MEM001"})),
                doc(json!({"_id": "m2", "membership_number": "MEM001"})),
            ],
        );
        m.insert(
            Collection::Loans,
            vec![doc(json!({"_id": "l1", "book_id": "b1", "adherent_id": "m2"}))],
        );
        m
    }

    #[test]
    fn finds_dangling_author_and_duplicate_membership() {
        let report = SeedReport::from_documents(&contents());
        assert_eq!(report.count(Collection::Books), 2);
        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].record_id, "b2");
        assert_eq!(report.dangling[0].value.as_deref(), Some("6"));
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].field, "membership_number");
        assert!(!report.is_consistent());
    }

    #[test]
    fn missing_reference_field_is_dangling() {
        let mut m = contents();
        m.insert(Collection::Loans, vec![doc(json!({"_id": "l1", "book_id": "b1"}))]);
        let report = SeedReport::from_documents(&m);
        assert!(report
            .dangling
            .iter()
            .any(|d| d.field == "adherent_id" && d.value.is_none()));
    }

    #[test]
    fn numeric_membership_numbers_count_as_duplicates() {
        let mut m = BTreeMap::new();
        m.insert(
            Collection::Adherents,
            vec![
                doc(json!({"_id": "m1", "membership_number": 7})),
                doc(json!({"_id": "m2", "membership_number": 7})),
            ],
        );
        let report = SeedReport::from_documents(&m);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].value, "7");
        assert_eq!(report.duplicates[0].occurrences, 2);
    }

    #[test]
    fn short_digest_renders_without_panicking() {
        let report = SeedReport {
            collections: vec![CollectionSummary {
                collection: Collection::Books,
                count: 0,
                digest: "abc".to_string(),
            }],
            dangling: Vec::new(),
            duplicates: Vec::new(),
        };
        assert!(report.to_string().contains("digest=abc"));
    }

    #[test]
    fn empty_store_is_consistent() {
        let report = SeedReport::from_documents(&BTreeMap::new());
        assert!(report.is_consistent());
        assert_eq!(report.count(Collection::Loans), 0);
        assert!(report.to_string().contains("consistent: yes"));
    }
}
