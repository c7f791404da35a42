//! The seed loader.
//!
//! Brings the four library collections to a known state:
//! reset, then authors, books, adherents and loans, in that order. Each step
//! returns the identifiers the next steps need to wire their references.
//! The first failure aborts the run; completed steps are not rolled back.

use crate::domain::dataset::Dataset;
use crate::domain::model::{to_document, Collection, Document, IdMap, RecordId};
use crate::storage::{DocumentStore, StoreError};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Store error while {step}: {source}")]
    Store {
        step: String,
        #[source]
        source: StoreError,
    },

    #[error("{collection} record '{key}' references unknown {target} key '{reference}'")]
    UnresolvedReference {
        collection: Collection,
        key: String,
        target: Collection,
        reference: String,
    },

    #[error("Invalid literal in {collection} record '{key}': {source}")]
    InvalidLiteral {
        collection: Collection,
        key: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Could not encode {collection} record '{key}': {source}")]
    Encode {
        collection: Collection,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} key '{key}' is used by more than one record")]
    DuplicateLogicalKey { collection: Collection, key: String },

    #[error("Store returned {got} identifiers for {expected} {collection} records")]
    IdCountMismatch {
        collection: Collection,
        expected: usize,
        got: usize,
    },
}

/// Identifiers assigned by a completed run.
#[derive(Debug, Clone)]
pub struct SeedOutcome {
    pub dataset: &'static str,
    pub authors: IdMap,
    pub books: IdMap,
    pub adherents: IdMap,
    pub loans: Vec<RecordId>,
}

impl SeedOutcome {
    /// Number of records inserted per collection.
    pub fn counts(&self) -> Vec<(Collection, usize)> {
        vec![
            (Collection::Authors, self.authors.len()),
            (Collection::Books, self.books.len()),
            (Collection::Adherents, self.adherents.len()),
            (Collection::Loans, self.loans.len()),
        ]
    }
}

pub struct SeedLoader<S: DocumentStore> {
    store: S,
    dataset: Dataset,
}

impl<S: DocumentStore> SeedLoader<S> {
    pub fn new(store: S, dataset: Dataset) -> Self {
        Self { store, dataset }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Removes all records from `collection`. Safe on an empty or missing collection.
    pub async fn reset(&self, collection: Collection) -> Result<(), SeedError> {
        debug!(%collection, "resetting collection");
        self.store
            .drop_collection(collection)
            .await
            .map_err(|source| SeedError::Store {
                step: format!("resetting {}", collection),
                source,
            })
    }

    pub async fn reset_all(&self) -> Result<(), SeedError> {
        for collection in Collection::ALL {
            self.reset(collection).await?;
        }
        Ok(())
    }

    /// Inserts the dataset's authors and maps each author key to its identifier.
    pub async fn seed_authors(&self) -> Result<IdMap, SeedError> {
        let collection = Collection::Authors;
        let mut keyed = Vec::with_capacity(self.dataset.authors.len());
        for seed in self.dataset.authors {
            keyed.push((seed.key, encode(collection, seed.key, &seed.record())?));
        }
        self.insert_keyed(collection, keyed).await
    }

    /// Inserts the dataset's books, resolving each author key through `authors`.
    pub async fn seed_books(&self, authors: &IdMap) -> Result<IdMap, SeedError> {
        let collection = Collection::Books;
        let mut keyed = Vec::with_capacity(self.dataset.books.len());
        for seed in self.dataset.books {
            let author_id = resolve(authors, collection, seed.key, seed.author)?;
            let book = seed
                .record(author_id)
                .map_err(|source| SeedError::InvalidLiteral {
                    collection,
                    key: seed.key.to_string(),
                    source,
                })?;
            keyed.push((seed.key, encode(collection, seed.key, &book)?));
        }
        self.insert_keyed(collection, keyed).await
    }

    /// Inserts the dataset's adherents, keyed by membership number.
    pub async fn seed_adherents(&self) -> Result<IdMap, SeedError> {
        let collection = Collection::Adherents;
        let mut keyed = Vec::with_capacity(self.dataset.adherents.len());
        for seed in self.dataset.adherents {
            keyed.push((seed.key(), encode(collection, seed.key(), &seed.record())?));
        }
        self.insert_keyed(collection, keyed).await
    }

    /// Inserts the dataset's loans, resolving book and adherent keys.
    pub async fn seed_loans(
        &self,
        books: &IdMap,
        adherents: &IdMap,
    ) -> Result<Vec<RecordId>, SeedError> {
        let collection = Collection::Loans;
        let mut documents = Vec::with_capacity(self.dataset.loans.len());
        for (i, seed) in self.dataset.loans.iter().enumerate() {
            let key = format!("loan #{}", i + 1);
            let book_id = resolve(books, collection, &key, seed.book)?;
            let adherent_id = resolve(adherents, collection, &key, seed.adherent)?;
            let loan = seed
                .record(book_id, adherent_id)
                .map_err(|source| SeedError::InvalidLiteral {
                    collection,
                    key: key.clone(),
                    source,
                })?;
            documents.push(encode(collection, &key, &loan)?);
        }

        let expected = documents.len();
        let ids = self.insert(collection, documents).await?;
        if ids.len() != expected {
            return Err(SeedError::IdCountMismatch {
                collection,
                expected,
                got: ids.len(),
            });
        }
        Ok(ids)
    }

    /// Resets every collection, then seeds them in dependency order.
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        info!(dataset = self.dataset.name, "seeding library collections");
        self.reset_all().await?;

        let authors = self.seed_authors().await?;
        let books = self.seed_books(&authors).await?;
        let adherents = self.seed_adherents().await?;
        let loans = self.seed_loans(&books, &adherents).await?;

        let outcome = SeedOutcome {
            dataset: self.dataset.name,
            authors,
            books,
            adherents,
            loans,
        };
        info!(dataset = outcome.dataset, "seeding complete");
        Ok(outcome)
    }

    async fn insert(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<Vec<RecordId>, SeedError> {
        let count = documents.len();
        let ids = self
            .store
            .insert_many(collection, documents)
            .await
            .map_err(|source| SeedError::Store {
                step: format!("seeding {}", collection),
                source,
            })?;
        info!(%collection, count, "seeded collection");
        Ok(ids)
    }

    async fn insert_keyed(
        &self,
        collection: Collection,
        keyed: Vec<(&'static str, Document)>,
    ) -> Result<IdMap, SeedError> {
        let mut seen = HashSet::with_capacity(keyed.len());
        if let Some((key, _)) = keyed.iter().find(|(key, _)| !seen.insert(*key)) {
            return Err(SeedError::DuplicateLogicalKey {
                collection,
                key: key.to_string(),
            });
        }

        let (keys, documents): (Vec<_>, Vec<_>) = keyed.into_iter().unzip();
        let ids = self.insert(collection, documents).await?;
        if ids.len() != keys.len() {
            return Err(SeedError::IdCountMismatch {
                collection,
                expected: keys.len(),
                got: ids.len(),
            });
        }

        let mut map = IdMap::new(collection);
        for (key, id) in keys.into_iter().zip(ids) {
            map.insert(key, id);
        }
        Ok(map)
    }
}

fn resolve(
    ids: &IdMap,
    collection: Collection,
    key: &str,
    reference: &str,
) -> Result<RecordId, SeedError> {
    ids.get(reference)
        .cloned()
        .ok_or_else(|| SeedError::UnresolvedReference {
            collection,
            key: key.to_string(),
            target: ids.collection(),
            reference: reference.to_string(),
        })
}

fn encode<T: serde::Serialize>(
    collection: Collection,
    key: &str,
    record: &T,
) -> Result<Document, SeedError> {
    to_document(record).map_err(|source| SeedError::Encode {
        collection,
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{AuthorSeed, BookSeed};
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn run_returns_maps_for_every_record() {
        let loader = SeedLoader::new(MemoryStore::new(), Dataset::canonical());
        let outcome = loader.run().await.unwrap();
        assert_eq!(outcome.authors.len(), 4);
        assert_eq!(outcome.books.len(), 6);
        assert_eq!(outcome.adherents.len(), 3);
        assert_eq!(outcome.loans.len(), 5);
        assert!(outcome.adherents.get("MEM002").is_some());
    }

    #[tokio::test]
    async fn books_need_author_ids() {
        let loader = SeedLoader::new(MemoryStore::new(), Dataset::canonical());
        let err = loader.seed_books(&IdMap::new(Collection::Authors)).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::UnresolvedReference { target: Collection::Authors, .. }
        ));
        assert_eq!(loader.store().count(Collection::Books).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_author_key_aborts_before_insert() {
        const AUTHORS: &[AuthorSeed] = &[
            AuthorSeed {
                key: "dup",
                first_name: "George",
                last_name: "Orwell",
                email: "orwell@example.com",
                nationality: "British",
            },
            AuthorSeed {
                key: "dup",
                first_name: "Jane",
                last_name: "Austen",
                email: "austen@example.com",
                nationality: "British",
            },
        ];
        let dataset = Dataset {
            name: "repeated",
            authors: AUTHORS,
            books: &[],
            adherents: &[],
            loans: &[],
        };
        let loader = SeedLoader::new(MemoryStore::new(), dataset);
        let err = loader.run().await.unwrap_err();
        match err {
            SeedError::DuplicateLogicalKey { collection, key } => {
                assert_eq!(collection, Collection::Authors);
                assert_eq!(key, "dup");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(loader.store().count(Collection::Authors).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn bad_date_literal_is_reported() {
        const AUTHORS: &[AuthorSeed] = &[AuthorSeed {
            key: "a",
            first_name: "A",
            last_name: "B",
            email: "a@example.com",
            nationality: "French",
        }];
        const BOOKS: &[BookSeed] = &[BookSeed {
            key: "bad",
            author: "a",
            title: "Bad date",
            description: None,
            location: "Shelf Z9",
            label: "Broken",
            category: "misc",
            publish_date: "2021-13-40",
            publisher: "Nobody",
            language: "English",
            link: "https://example.com/bad",
        }];
        let dataset = Dataset {
            name: "broken",
            authors: AUTHORS,
            books: BOOKS,
            adherents: &[],
            loans: &[],
        };
        let loader = SeedLoader::new(MemoryStore::new(), dataset);
        let err = loader.run().await.unwrap_err();
        assert!(matches!(err, SeedError::InvalidLiteral { collection: Collection::Books, .. }));
        // Authors were already committed.
        assert_eq!(loader.store().count(Collection::Authors).await.unwrap(), 1);
    }
}
