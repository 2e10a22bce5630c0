//! Stateless command line parser.
//!
//! Pure function for turning one typed line into a [`Command`].
//!
//! # Example
//!
//! ```
//! use book_library::commands::{Command, CommandParser};
//!
//! let cmd = CommandParser::parse("take-book 1 2 14").unwrap();
//! assert!(matches!(cmd, Command::TakeBook { book_id: 1, reader_id: 2, days: 14 }));
//! ```

use super::Command;
use crate::{
    error::{AppError, AppResult},
    models::{BookField, BookFilter},
};

const FILTER_PREFIX: &str = "-f-";

pub struct CommandParser;

impl CommandParser {
    /// Parses a line of input into a command.
    ///
    /// | Input | Command |
    /// |-------|---------|
    /// | `add-book` / `add-reader` | start collecting answers for a new record |
    /// | `list-books [-f-<field> <value>] [-f-taken] [-f-available]` | list books |
    /// | `list-readers` / `list-lendings` | list readers / open lendings |
    /// | `delete-book <id>` / `delete-reader <id>` | delete a record |
    /// | `take-book <book id> <reader id> <days>` | lend a book |
    /// | `return-book <book id>` | return a book |
    /// | `help` / `exit` | help text / leave (`exit` takes no arguments) |
    pub fn parse(line: &str) -> AppResult<Command> {
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = args.first() else {
            return Ok(Command::Empty);
        };

        let command = match first.to_lowercase().as_str() {
            "add-book" => Command::AddBook,
            "add-reader" => Command::AddReader,
            "list-books" => Command::ListBooks(parse_book_filter(&args[1..])),
            "list-readers" => Command::ListReaders,
            "list-lendings" => Command::ListLendings,
            "delete-book" => Command::DeleteBook(parse_single_id(&args, "The book ID was not recognized.")?),
            "delete-reader" => {
                Command::DeleteReader(parse_single_id(&args, "The reader ID was not recognized.")?)
            }
            "take-book" => {
                let [_, book_id, reader_id, days] = args.as_slice() else {
                    return Err(unprocessable());
                };
                Command::TakeBook {
                    book_id: book_id.parse().map_err(|_| unprocessable())?,
                    reader_id: reader_id.parse().map_err(|_| unprocessable())?,
                    days: days.parse().map_err(|_| unprocessable())?,
                }
            }
            "return-book" => {
                let [_, book_id] = args.as_slice() else {
                    return Err(unprocessable());
                };
                Command::ReturnBook {
                    book_id: book_id.parse().map_err(|_| unprocessable())?,
                }
            }
            "help" => Command::Help,
            "exit" => {
                if args.len() > 1 {
                    return Err(unprocessable());
                }
                Command::Exit
            }
            _ => Command::Unknown((*first).to_string()),
        };

        Ok(command)
    }
}

fn unprocessable() -> AppError {
    AppError::BadRequest("The command could not be processed.".to_string())
}

fn parse_single_id(args: &[&str], unrecognized: &str) -> AppResult<i32> {
    let [_, id] = args else {
        return Err(unprocessable());
    };
    id.parse()
        .map_err(|_| AppError::BadRequest(unrecognized.to_string()))
}

/// Build a filter from `-f-` options.
///
/// Text fields take the next token as value, or a run of tokens wrapped in
/// double quotes. Unknown fields are ignored.
fn parse_book_filter(args: &[&str]) -> BookFilter {
    let mut filter = BookFilter::new();
    let mut i = 0;

    while i < args.len() {
        let Some(property) = args[i].strip_prefix(FILTER_PREFIX) else {
            i += 1;
            continue;
        };
        i += 1;

        match property.to_lowercase().as_str() {
            "taken" => filter = filter.taken(),
            "available" => filter = filter.available(),
            _ => {
                let value = match args.get(i) {
                    Some(next) if next.starts_with('"') => {
                        let (value, next_index) = take_quoted(args, i);
                        i = next_index;
                        value
                    }
                    Some(next) if !next.starts_with(FILTER_PREFIX) => {
                        i += 1;
                        (*next).to_string()
                    }
                    _ => String::new(),
                };

                match property.parse::<BookField>() {
                    Ok(field) => filter = filter.contains(field, value),
                    Err(e) => tracing::debug!("Ignoring book filter: {}", e),
                }
            }
        }
    }

    filter
}

/// Join tokens from `start` up to the one closing the double quote.
/// Returns the unquoted value and the index after the consumed tokens.
fn take_quoted(args: &[&str], start: usize) -> (String, usize) {
    let mut parts: Vec<&str> = Vec::new();

    for (offset, token) in args[start..].iter().enumerate() {
        let token: &str = if offset == 0 { &token[1..] } else { token };
        if let Some(last) = token.strip_suffix('"') {
            parts.push(last);
            return (parts.join(" "), start + offset + 1);
        }
        parts.push(token);
    }

    // unterminated quote runs to the end of the line
    (parts.join(" "), args.len())
}
