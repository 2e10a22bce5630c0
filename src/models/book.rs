//! Book model and related types

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::Entity;
use crate::error::{AppError, AppResult};

static ISBN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{9}[\dX]|\d{13})$").expect("ISBN pattern is valid")
});

/// Date layouts accepted for the publication date, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d.%m.%Y"];

/// Book model as stored in `books.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category: String,
    pub language: String,
    pub publication_date: NaiveDate,
    pub isbn: String,
    pub is_lent: bool,
}

impl Entity for Book {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Publication date: {}", self.publication_date.format("%Y-%m-%d"))?;
        writeln!(f, "ISBN: {}", self.isbn)?;
        writeln!(f, "Is lent: {}", if self.is_lent { "yes" } else { "no" })
    }
}

/// Text fields a book listing can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Name,
    Author,
    Category,
    Language,
    Isbn,
}

impl BookField {
    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Name => &book.name,
            BookField::Author => &book.author,
            BookField::Category => &book.category,
            BookField::Language => &book.language,
            BookField::Isbn => &book.isbn,
        }
    }
}

impl FromStr for BookField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(BookField::Name),
            "author" => Ok(BookField::Author),
            "category" => Ok(BookField::Category),
            "language" => Ok(BookField::Language),
            "isbn" => Ok(BookField::Isbn),
            _ => Err(format!("Unknown book field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookCriterion {
    /// Case-insensitive substring match on a text field
    Contains(BookField, String),
    Taken,
    Available,
}

impl BookCriterion {
    fn matches(&self, book: &Book) -> bool {
        match self {
            BookCriterion::Contains(field, needle) => field
                .value(book)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            BookCriterion::Taken => book.is_lent,
            BookCriterion::Available => !book.is_lent,
        }
    }
}

/// Conjunction of criteria applied when listing books
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub criteria: Vec<BookCriterion>,
}

impl BookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, field: BookField, value: impl Into<String>) -> Self {
        self.criteria.push(BookCriterion::Contains(field, value.into()));
        self
    }

    pub fn taken(mut self) -> Self {
        self.criteria.push(BookCriterion::Taken);
        self
    }

    pub fn available(mut self) -> Self {
        self.criteria.push(BookCriterion::Available);
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.criteria.iter().all(|c| c.matches(book))
    }
}

/// Create book request, one field per collected answer
#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub category: String,
    pub language: String,
    pub publication_date: String,
    pub isbn: String,
}

impl CreateBook {
    /// Prompts shown, in order, while collecting the answers
    pub const PROMPTS: &'static [&'static str] = &[
        "Book name: ",
        "Author: ",
        "Category: ",
        "Language: ",
        "Publication date: ",
        "ISBN: ",
    ];

    pub fn from_answers(answers: &[String]) -> AppResult<Self> {
        match answers {
            [name, author, category, language, publication_date, isbn] => Ok(Self {
                name: name.trim().to_string(),
                author: author.trim().to_string(),
                category: category.trim().to_string(),
                language: language.trim().to_string(),
                publication_date: publication_date.trim().to_string(),
                isbn: isbn.trim().to_string(),
            }),
            _ => Err(AppError::BadRequest(format!(
                "Expected {} answers for a new book, got {}",
                Self::PROMPTS.len(),
                answers.len()
            ))),
        }
    }

    /// Validate the request and turn it into a book without an id
    pub fn into_book(self) -> AppResult<Book> {
        self.validate()?;

        let publication_date = parse_publication_date(&self.publication_date).ok_or_else(|| {
            AppError::Validation(format!(
                "Publication date '{}' is not a valid date",
                self.publication_date
            ))
        })?;

        let isbn = normalize_isbn(&self.isbn);
        if !isbn.is_empty() && !ISBN_RE.is_match(&isbn) {
            return Err(AppError::Validation(format!(
                "ISBN '{}' must have 10 or 13 digits",
                self.isbn
            )));
        }

        Ok(Book {
            id: 0,
            name: self.name,
            author: self.author,
            category: self.category,
            language: self.language,
            publication_date,
            isbn,
            is_lent: false,
        })
    }
}

pub fn parse_publication_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|d| d.date_naive())
        })
}

fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_book() -> Book {
        Book {
            id: 1,
            name: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            category: "Programming".to_string(),
            language: "English".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2009, 3, 1).unwrap(),
            isbn: "9780132350884".to_string(),
            is_lent: false,
        }
    }

    #[test]
    fn test_create_book_from_valid_answers() {
        let book = CreateBook::from_answers(&answers(&[
            "Clean Code",
            "Robert C. Martin",
            "Programming",
            "English",
            "2009-03-01",
            "978-0-13-235088-4",
        ]))
        .unwrap()
        .into_book()
        .unwrap();

        assert_eq!(book.id, 0);
        assert_eq!(book.isbn, "9780132350884");
        assert_eq!(book.publication_date, NaiveDate::from_ymd_opt(2009, 3, 1).unwrap());
        assert!(!book.is_lent);
    }

    #[test]
    fn test_create_book_wrong_answer_count() {
        assert!(matches!(
            CreateBook::from_answers(&answers(&["", "Less than 6 answers"])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            CreateBook::from_answers(&answers(&["", "", "", "", "2000-01-01", "", "extra"])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_create_book_invalid_date() {
        let request = CreateBook::from_answers(&answers(&[
            "Name", "Author", "", "", "Invalid date format", "",
        ]))
        .unwrap();
        assert!(matches!(request.into_book(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_book_requires_name_and_author() {
        let request =
            CreateBook::from_answers(&answers(&["", "", "", "", "2000-01-01", ""])).unwrap();
        match request.into_book() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Book name must not be empty"));
                assert!(msg.contains("Author must not be empty"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_create_book_rejects_bad_isbn() {
        let request = CreateBook::from_answers(&answers(&[
            "Name", "Author", "", "", "2000-01-01", "12345",
        ]))
        .unwrap();
        assert!(matches!(request.into_book(), Err(AppError::Validation(_))));

        let request = CreateBook::from_answers(&answers(&[
            "Name", "Author", "", "", "2000-01-01", "0-306-40615-x",
        ]))
        .unwrap();
        assert_eq!(request.into_book().unwrap().isbn, "030640615X");

        // only spaces and hyphens are separators
        for isbn in ["0.306.40615.X", "978_0132350884", "0306406152!"] {
            let request = CreateBook::from_answers(&answers(&[
                "Name", "Author", "", "", "2000-01-01", isbn,
            ]))
            .unwrap();
            assert!(matches!(request.into_book(), Err(AppError::Validation(_))), "{}", isbn);
        }
        let request = CreateBook::from_answers(&answers(&[
            "Name", "Author", "", "", "2000-01-01", "978 0 13 235088 4",
        ]))
        .unwrap();
        assert_eq!(request.into_book().unwrap().isbn, "9780132350884");
    }

    #[test]
    fn test_parse_publication_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2009, 3, 1);
        assert_eq!(parse_publication_date("2009-03-01"), expected);
        assert_eq!(parse_publication_date("2009/03/01"), expected);
        assert_eq!(parse_publication_date("01.03.2009"), expected);
        assert_eq!(parse_publication_date("2009-03-01T10:00:00+02:00"), expected);
        assert_eq!(parse_publication_date("March 2009"), None);
    }

    #[test]
    fn test_display_book() {
        let expected = "Id: 1\nName: Clean Code\nAuthor: Robert C. Martin\nCategory: Programming\n\
                        Language: English\nPublication date: 2009-03-01\nISBN: 9780132350884\nIs lent: no\n";
        assert_eq!(sample_book().to_string(), expected);
    }

    #[test]
    fn test_filter_matches() {
        let book = sample_book();
        assert!(BookFilter::new().matches(&book));
        assert!(BookFilter::new().contains(BookField::Author, "MARTIN").matches(&book));
        assert!(BookFilter::new().available().matches(&book));
        assert!(!BookFilter::new().taken().matches(&book));
        assert!(!BookFilter::new()
            .contains(BookField::Name, "clean")
            .contains(BookField::Language, "lithuanian")
            .matches(&book));
    }

    #[test]
    fn test_book_field_from_str() {
        assert_eq!("ISBN".parse::<BookField>(), Ok(BookField::Isbn));
        assert_eq!("Name".parse::<BookField>(), Ok(BookField::Name));
        assert!("publicationdate".parse::<BookField>().is_err());
    }
}
