//! Literal seed datasets.
//!
//! Records are written with logical keys; references between collections name
//! the key of the target record and are resolved to identifiers at seed time.

use crate::domain::model::{Adherent, Author, Book, Loan, RecordId, Role};
use chrono::NaiveDate;

mod canonical;
mod catalogue;

pub const DEFAULT_DATASET: &str = "canonical";

#[derive(Debug, Clone, Copy)]
pub struct AuthorSeed {
    pub key: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub nationality: &'static str,
}

impl AuthorSeed {
    pub fn record(&self) -> Author {
        Author {
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            email: self.email.to_string(),
            nationality: self.nationality.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BookSeed {
    pub key: &'static str,
    /// Key of the author in the same dataset.
    pub author: &'static str,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub location: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub publish_date: &'static str,
    pub publisher: &'static str,
    pub language: &'static str,
    pub link: &'static str,
}

impl BookSeed {
    pub fn record(&self, author_id: RecordId) -> Result<Book, chrono::ParseError> {
        Ok(Book {
            title: self.title.to_string(),
            description: self.description.map(str::to_string),
            location: self.location.to_string(),
            label: self.label.to_string(),
            category: self.category.to_string(),
            publish_date: parse_date(self.publish_date)?,
            publisher: self.publisher.to_string(),
            language: self.language.to_string(),
            link: self.link.to_string(),
            author_id,
        })
    }
}

/// Adherents are keyed by their membership number.
#[derive(Debug, Clone, Copy)]
pub struct AdherentSeed {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub membership_number: &'static str,
    pub login: &'static str,
    pub password: &'static str,
    pub role: Role,
}

impl AdherentSeed {
    pub fn key(&self) -> &'static str {
        self.membership_number
    }

    pub fn record(&self) -> Adherent {
        Adherent {
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            membership_number: self.membership_number.to_string(),
            login: self.login.to_string(),
            password: self.password.to_string(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoanSeed {
    pub loan_date: &'static str,
    pub return_date: &'static str,
    /// Key of the borrowed book.
    pub book: &'static str,
    /// Membership number of the borrower.
    pub adherent: &'static str,
}

impl LoanSeed {
    pub fn record(
        &self,
        book_id: RecordId,
        adherent_id: RecordId,
    ) -> Result<Loan, chrono::ParseError> {
        Ok(Loan {
            loan_date: parse_date(self.loan_date)?,
            return_date: parse_date(self.return_date)?,
            book_id,
            adherent_id,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

/// A complete, named set of seed records.
#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    pub name: &'static str,
    pub authors: &'static [AuthorSeed],
    pub books: &'static [BookSeed],
    pub adherents: &'static [AdherentSeed],
    pub loans: &'static [LoanSeed],
}

impl Dataset {
    /// 4 authors, 6 books, 3 adherents, 5 loans.
    pub fn canonical() -> Self {
        Dataset {
            name: "canonical",
            authors: AUTHORS,
            books: canonical::books(),
            adherents: ADHERENTS,
            loans: canonical::LOANS,
        }
    }

    /// The full 12-book shelf with the historical loans.
    pub fn catalogue() -> Self {
        Dataset {
            name: "catalogue",
            authors: AUTHORS,
            books: catalogue::BOOKS,
            adherents: ADHERENTS,
            loans: catalogue::LOANS,
        }
    }

    pub fn names() -> &'static [&'static str] {
        &["canonical", "catalogue"]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "canonical" => Some(Self::canonical()),
            "catalogue" => Some(Self::catalogue()),
            _ => None,
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::canonical()
    }
}

const AUTHORS: &[AuthorSeed] = &[
    AuthorSeed {
        key: "orwell",
        first_name: "George",
        last_name: "Orwell",
        email: "orwell@example.com",
        nationality: "British",
    },
    AuthorSeed {
        key: "austen",
        first_name: "Jane",
        last_name: "Austen",
        email: "austen@example.com",
        nationality: "British",
    },
    AuthorSeed {
        key: "hemingway",
        first_name: "Ernest",
        last_name: "Hemingway",
        email: "hemingway@example.com",
        nationality: "American",
    },
    AuthorSeed {
        key: "twain",
        first_name: "Mark",
        last_name: "Twain",
        email: "twain@example.com",
        nationality: "American",
    },
];

const ADHERENTS: &[AdherentSeed] = &[
    AdherentSeed {
        first_name: "Alice",
        last_name: "Smith",
        membership_number: "MEM001",
        login: "asmith",
        password: "hashed_password1",
        role: Role::Professor,
    },
    AdherentSeed {
        first_name: "Bob",
        last_name: "Brown",
        membership_number: "MEM002",
        login: "bbrown",
        password: "hashed_password2",
        role: Role::Librarian,
    },
    AdherentSeed {
        first_name: "Charlie",
        last_name: "Davis",
        membership_number: "MEM003",
        login: "cdavis",
        password: "hashed_password3",
        role: Role::Student,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn check_keys(dataset: &Dataset) {
        let authors: HashSet<_> = dataset.authors.iter().map(|a| a.key).collect();
        let books: HashSet<_> = dataset.books.iter().map(|b| b.key).collect();
        let adherents: HashSet<_> = dataset.adherents.iter().map(|a| a.key()).collect();
        assert_eq!(authors.len(), dataset.authors.len(), "duplicate author key");
        assert_eq!(books.len(), dataset.books.len(), "duplicate book key");
        assert_eq!(adherents.len(), dataset.adherents.len(), "duplicate membership number");
        for b in dataset.books {
            assert!(authors.contains(b.author), "{} -> {}", b.key, b.author);
            assert!(parse_date(b.publish_date).is_ok(), "{}", b.key);
        }
        for l in dataset.loans {
            assert!(books.contains(l.book), "loan -> {}", l.book);
            assert!(adherents.contains(l.adherent), "loan -> {}", l.adherent);
            assert!(parse_date(l.loan_date).is_ok());
            assert!(parse_date(l.return_date).is_ok());
        }
    }

    #[test]
    fn every_dataset_is_self_consistent() {
        for name in Dataset::names() {
            check_keys(&Dataset::by_name(name).unwrap());
        }
    }

    #[test]
    fn canonical_sizes() {
        let d = Dataset::canonical();
        assert_eq!(
            (d.authors.len(), d.books.len(), d.adherents.len(), d.loans.len()),
            (4, 6, 3, 5)
        );
        let second = d.loans[1].book;
        let book = d.books.iter().find(|b| b.key == second).unwrap();
        assert_eq!(book.title, "Modern Web Development");
    }

    #[test]
    fn canonical_keeps_every_historical_loan_in_order() {
        let canonical = Dataset::canonical();
        let historical = Dataset::catalogue().loans;
        for (i, loan) in historical.iter().enumerate() {
            let kept = &canonical.loans[i];
            assert_eq!(
                (kept.loan_date, kept.return_date, kept.book, kept.adherent),
                (loan.loan_date, loan.return_date, loan.book, loan.adherent),
                "loan #{}",
                i + 1
            );
        }
        assert_eq!(canonical.loans[4].adherent, "MEM003");
    }

    #[test]
    fn catalogue_sizes() {
        let d = Dataset::catalogue();
        assert_eq!(
            (d.authors.len(), d.books.len(), d.adherents.len(), d.loans.len()),
            (4, 12, 3, 4)
        );
    }

    #[test]
    fn unknown_dataset_name() {
        assert!(Dataset::by_name("nope").is_none());
        assert_eq!(Dataset::default().name, DEFAULT_DATASET);
    }
}
