//! The full shelf: twelve books spread over the four authors.

use super::{BookSeed, LoanSeed};

pub(super) const BOOKS: &[BookSeed] = &[
    BookSeed {
        key: "data-science",
        author: "hemingway",
        title: "Introduction to Data Science",
        description: Some("A comprehensive guide to data science principles and applications."),
        location: "Shelf A1",
        label: "Data Science Basics",
        category: "datascience",
        publish_date: "2021-05-15",
        publisher: "Springer",
        language: "English",
        link: "https://example.com/data-science",
    },
    BookSeed {
        key: "web-development",
        author: "austen",
        title: "Modern Web Development",
        description: Some("Exploring the latest trends in front-end and back-end web development."),
        location: "Shelf B3",
        label: "Web Technologies",
        category: "web",
        publish_date: "2023-01-20",
        publisher: "O'Reilly",
        language: "English",
        link: "https://example.com/web-development",
    },
    BookSeed {
        key: "linear-algebra",
        author: "orwell",
        title: "Linear Algebra and Its Applications",
        description: Some("An essential textbook for students and researchers in mathematics."),
        location: "Shelf C2",
        label: "Mathematical Foundations",
        category: "algebra",
        publish_date: "2019-09-10",
        publisher: "Pearson",
        language: "English",
        link: "https://example.com/linear-algebra",
    },
    BookSeed {
        key: "optimization-ml",
        author: "austen",
        title: "Optimization Techniques in Machine Learning",
        description: Some("A deep dive into optimization methods used in AI and ML."),
        location: "Shelf D5",
        label: "Advanced Optimization",
        category: "optimization",
        publish_date: "2022-07-12",
        publisher: "MIT Press",
        language: "English",
        link: "https://example.com/optimization-ml",
    },
    BookSeed {
        key: "philosophy",
        author: "twain",
        title: "The Art of Philosophy",
        description: Some("Exploring fundamental philosophical questions and theories."),
        location: "Shelf E1",
        label: "Philosophy Insights",
        category: "phylosophy",
        publish_date: "2018-03-25",
        publisher: "Oxford University Press",
        language: "French",
        link: "https://example.com/philosophy",
    },
    BookSeed {
        key: "literary-classics",
        author: "hemingway",
        title: "Classic Literary Works",
        description: Some("A collection of timeless literary masterpieces."),
        location: "Shelf F4",
        label: "Literary Classics",
        category: "literary",
        publish_date: "2015-11-30",
        publisher: "Penguin Books",
        language: "English",
        link: "https://example.com/literary-classics",
    },
    BookSeed {
        key: "os-concepts",
        author: "austen",
        title: "Operating System Concepts",
        description: Some("An introduction to modern operating system principles."),
        location: "Shelf G6",
        label: "System Programming",
        category: "system",
        publish_date: "2020-04-18",
        publisher: "Wiley",
        language: "English",
        link: "https://example.com/os-concepts",
    },
    BookSeed {
        key: "computer-networks",
        author: "orwell",
        title: "Computer Networks: A Systems Approach",
        description: Some("A detailed study on networking principles and applications."),
        location: "Shelf H2",
        label: "Networking Basics",
        category: "network",
        publish_date: "2021-09-05",
        publisher: "Morgan Kaufmann",
        language: "English",
        link: "https://example.com/computer-networks",
    },
    BookSeed {
        key: "fundamentals-physics",
        author: "twain",
        title: "Fundamentals of Physics",
        description: Some("A comprehensive guide to classical and modern physics."),
        location: "Shelf I3",
        label: "Physics Essentials",
        category: "physic",
        publish_date: "2017-06-22",
        publisher: "McGraw-Hill",
        language: "English",
        link: "https://example.com/fundamentals-physics",
    },
    BookSeed {
        key: "chemistry",
        author: "hemingway",
        title: "Principles of Chemistry",
        description: Some("An in-depth look at chemical reactions and molecular structures."),
        location: "Shelf J1",
        label: "Chemistry Principles",
        category: "chemistry",
        publish_date: "2016-12-10",
        publisher: "Pearson",
        language: "English",
        link: "https://example.com/chemistry",
    },
    BookSeed {
        key: "optics",
        author: "austen",
        title: "Introduction to Optics",
        description: Some("A study on the behavior and properties of light."),
        location: "Shelf K4",
        label: "Optical Physics",
        category: "optic",
        publish_date: "2018-08-14",
        publisher: "Cambridge University Press",
        language: "English",
        link: "https://example.com/optics",
    },
    BookSeed {
        key: "electronics",
        author: "orwell",
        title: "Electronic Circuits and Applications",
        description: Some("A hands-on guide to designing and analyzing electronic circuits."),
        location: "Shelf L5",
        label: "Electronics Engineering",
        category: "electronic",
        publish_date: "2019-03-29",
        publisher: "Prentice Hall",
        language: "English",
        link: "https://example.com/electronics",
    },
];

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
];
