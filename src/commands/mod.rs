//! Command parsing and dispatch

pub mod handler;
pub mod parser;

pub use handler::CommandHandler;
pub use parser::CommandParser;

use crate::models::{BookFilter, CreateBook, CreateReader};

/// One parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    Help,
    Exit,
    AddBook,
    AddReader,
    ListBooks(BookFilter),
    ListReaders,
    ListLendings,
    DeleteBook(i32),
    DeleteReader(i32),
    TakeBook { book_id: i32, reader_id: i32, days: i64 },
    ReturnBook { book_id: i32 },
    Unknown(String),
}

/// Multi-prompt input forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Book,
    Reader,
}

impl Form {
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            Form::Book => CreateBook::PROMPTS,
            Form::Reader => CreateReader::PROMPTS,
        }
    }
}

/// What the console should do after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    /// Ask every prompt of the form, then call `CommandHandler::process_answers`
    Collect(Form),
    Nothing,
    Exit,
}
