pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;

// Convenience re-exports (keeps call-sites clean)
pub use app::seed_service::{SeedError, SeedLoader, SeedOutcome};
pub use crypto::hashing::{canonical_json, content_digest};
pub use domain::dataset::Dataset;
pub use domain::model::{Adherent, Author, Book, Collection, IdMap, Loan, RecordId, Role};
pub use domain::verify::SeedReport;
pub use storage::{DocumentStore, MemoryStore, PostgresStore, StoreError};
