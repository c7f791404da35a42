//! The reference dataset: the first six shelf entries, the four historical
//! loans and one loan for the third adherent.

use super::{catalogue, BookSeed, LoanSeed};

pub(super) fn books() -> &'static [BookSeed] {
    &catalogue::BOOKS[..6]
}

pub(super) const LOANS: &[LoanSeed] = &[
    LoanSeed {
        loan_date: "2012-10-10",
        return_date: "2012-10-27",
        book: "data-science",
        adherent: "MEM001",
    },
    LoanSeed {
        loan_date: "2024-12-10",
        return_date: "2025-01-10",
        book: "web-development",
        adherent: "MEM001",
    },
    LoanSeed {
        loan_date: "2024-10-06",
        return_date: "2024-12-30",
        book: "data-science",
        adherent: "MEM002",
    },
    LoanSeed {
        loan_date: "2012-10-10",
        return_date: "2012-10-27",
        book: "web-development",
        adherent: "MEM001",
    },
    LoanSeed {
        loan_date: "2025-01-15",
        return_date: "2025-02-14",
        book: "linear-algebra",
        adherent: "MEM003",
    },
];
