//! Typed records for the four collections.
//!
//! Field names follow the stored document layout, including the camelCase
//! date fields (`publishDate`, `loanDate`, `returnDate`).

use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    pub label: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "publishDate")]
    pub publish_date: NaiveDate,
    pub publisher: String,
    pub language: String,
    pub link: String,
    pub author_id: RecordId,
}

/// Membership role of an adherent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Professor,
    Librarian,
    Student,
}

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adherent {
    pub first_name: String,
    pub last_name: String,
    pub membership_number: String,
    pub login: String,
    /// Opaque password hash, stored as given.
    pub password: String,
    pub role: Role,
}

/// One book lent to one adherent. Dates are not checked for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "loanDate")]
    pub loan_date: NaiveDate,
    #[serde(rename = "returnDate")]
    pub return_date: NaiveDate,
    pub book_id: RecordId,
    pub adherent_id: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::to_document;
    use serde_json::json;

    #[test]
    fn book_uses_document_field_names() {
        let book = Book {
            title: "Modern Web Development".into(),
            description: None,
            location: "Shelf B3".into(),
            label: "Web Technologies".into(),
            category: "web".into(),
            publish_date: NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
            publisher: "O'Reilly".into(),
            language: "English".into(),
            link: "https://example.com/web-development".into(),
            author_id: RecordId::from_raw("a1"),
        };
        let doc = to_document(&book).unwrap();
        assert_eq!(doc["type"], json!("web"));
        assert_eq!(doc["publishDate"], json!("2023-01-20"));
        assert_eq!(doc["author_id"], json!("a1"));
        assert!(!doc.contains_key("description"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Librarian).unwrap(), json!("librarian"));
        let parsed: Role = serde_json::from_value(json!("student")).unwrap();
        assert_eq!(parsed, Role::Student);
        assert!(serde_json::from_value::<Role>(json!("janitor")).is_err());
    }

    #[test]
    fn loan_reads_back_from_document() {
        let doc = json!({
            "_id": "l1",
            "loanDate": "2024-12-10",
            "returnDate": "2025-01-10",
            "book_id": "b1",
            "adherent_id": "m1"
        });
        let loan: Loan = serde_json::from_value(doc).unwrap();
        assert_eq!(loan.book_id.as_str(), "b1");
        assert_eq!(loan.return_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    }
}
