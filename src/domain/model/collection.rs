use serde::Serialize;
use std::fmt;

/// The four collections managed by the seed loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Books,
    Authors,
    Adherents,
    Loans,
}

impl Collection {
    /// Every collection, in reset order.
    pub const ALL: [Collection; 4] = [
        Collection::Books,
        Collection::Authors,
        Collection::Adherents,
        Collection::Loans,
    ];

    /// Returns the name of the collection (also its table name).
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Authors => "authors",
            Collection::Adherents => "adherents",
            Collection::Loans => "loans",
        }
    }

    /// Document fields that must be unique across the collection, besides `_id`.
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Adherents => &["membership_number"],
            _ => &[],
        }
    }

    /// Fields holding identifiers of records in other collections.
    pub fn reference_fields(&self) -> &'static [(&'static str, Collection)] {
        match self {
            Collection::Books => &[("author_id", Collection::Authors)],
            Collection::Loans => &[
                ("book_id", Collection::Books),
                ("adherent_id", Collection::Adherents),
            ],
            _ => &[],
        }
    }

    /// Returns the CREATE TABLE statement backing this collection.
    ///
    /// `seq` keeps insertion order; the document body is stored as JSONB.
    pub fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                seq BIGSERIAL NOT NULL,
                id TEXT PRIMARY KEY,
                document JSONB NOT NULL
            )",
            self.name()
        )
    }

    /// Unique expression indexes for `unique_fields`.
    pub fn create_index_sql(&self) -> Vec<String> {
        self.unique_fields()
            .iter()
            .map(|field| {
                format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS {table}_{field}_key ON {table} ((document->>'{field}'))",
                    table = self.name(),
                    field = field
                )
            })
            .collect()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct_table_names() {
        let names: std::collections::HashSet<_> =
            Collection::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(Collection::Adherents.to_string(), "adherents");
    }

    #[test]
    fn only_adherents_have_unique_index() {
        assert_eq!(Collection::Adherents.create_index_sql().len(), 1);
        assert!(Collection::Adherents.create_index_sql()[0]
            .contains("adherents_membership_number_key"));
        assert!(Collection::Books.create_index_sql().is_empty());
    }

    #[test]
    fn loans_reference_books_and_adherents() {
        let targets: Vec<Collection> = Collection::Loans
            .reference_fields()
            .iter()
            .map(|(_, c)| *c)
            .collect();
        assert_eq!(targets, vec![Collection::Books, Collection::Adherents]);
    }
}
