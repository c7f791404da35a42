//! Read-back audit of a seeded store.

pub mod report;

pub use report::{CollectionSummary, DanglingReference, DuplicateValue, SeedReport};
