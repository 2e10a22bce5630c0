//! Reader model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::Entity;
use crate::error::{AppError, AppResult};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9 ()\-]+$").expect("phone pattern is valid")
});

/// Reader model as stored in `readers.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: String,
    /// Books currently lent to this reader
    #[serde(default)]
    pub taken_books_count: u32,
}

impl Entity for Reader {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "First name: {}", self.first_name)?;
        writeln!(f, "Last name: {}", self.last_name)?;
        writeln!(f, "E-mail: {}", self.email)?;
        writeln!(f, "Phone number: {}", self.phone_no)?;
        writeln!(f, "Number of taken books: {}", self.taken_books_count)
    }
}

/// Create reader request
#[derive(Debug, Clone, Validate)]
pub struct CreateReader {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone_no: String,
}

impl CreateReader {
    pub const PROMPTS: &'static [&'static str] =
        &["First name: ", "Last name: ", "E-mail: ", "Phone number: "];

    pub fn from_answers(answers: &[String]) -> AppResult<Self> {
        match answers {
            [first_name, last_name, email, phone_no] => Ok(Self {
                first_name: first_name.trim().to_string(),
                last_name: last_name.trim().to_string(),
                email: email.trim().to_string(),
                phone_no: phone_no.trim().to_string(),
            }),
            _ => Err(AppError::BadRequest(format!(
                "Expected {} answers for a new reader, got {}",
                Self::PROMPTS.len(),
                answers.len()
            ))),
        }
    }

    pub fn into_reader(self) -> AppResult<Reader> {
        self.validate()?;

        if !self.phone_no.is_empty() {
            let digits = self.phone_no.chars().filter(|c| c.is_ascii_digit()).count();
            if !PHONE_RE.is_match(&self.phone_no) || !(5..=20).contains(&digits) {
                return Err(AppError::Validation(format!(
                    "Phone number '{}' is not valid",
                    self.phone_no
                )));
            }
        }

        Ok(Reader {
            id: 0,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_no: self.phone_no,
            taken_books_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_create_reader_from_valid_answers() {
        let reader = CreateReader::from_answers(&answers(&[
            "John",
            "Smith",
            "j.smith@gmail.com",
            "+37061234567",
        ]))
        .unwrap()
        .into_reader()
        .unwrap();

        assert_eq!(reader.first_name, "John");
        assert_eq!(reader.taken_books_count, 0);
    }

    #[test]
    fn test_create_reader_wrong_answer_count() {
        assert!(CreateReader::from_answers(&answers(&["", "Less than 4"])).is_err());
        assert!(CreateReader::from_answers(&answers(&["", "", "", "", "More than 4"])).is_err());
    }

    #[test]
    fn test_create_reader_invalid_email() {
        let request =
            CreateReader::from_answers(&answers(&["John", "Smith", "not-an-email", ""])).unwrap();
        match request.into_reader() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid email format"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_create_reader_phone_rules() {
        let ok = CreateReader::from_answers(&answers(&["A", "B", "a@b.lt", ""])).unwrap();
        assert!(ok.into_reader().is_ok());

        let bad = CreateReader::from_answers(&answers(&["A", "B", "a@b.lt", "call me"])).unwrap();
        assert!(bad.into_reader().is_err());

        let short = CreateReader::from_answers(&answers(&["A", "B", "a@b.lt", "+12"])).unwrap();
        assert!(short.into_reader().is_err());
    }

    #[test]
    fn test_display_reader() {
        let reader = Reader {
            id: 2,
            first_name: "Reader 2".to_string(),
            last_name: String::new(),
            email: String::new(),
            phone_no: String::new(),
            taken_books_count: 3,
        };
        assert_eq!(
            reader.to_string(),
            "Id: 2\nFirst name: Reader 2\nLast name: \nE-mail: \nPhone number: \nNumber of taken books: 3\n"
        );
    }
}
