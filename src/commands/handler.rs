//! Dispatches parsed commands to the services and renders the replies

use std::fmt::Display;

use super::{Command, CommandParser, Form, Reply};
use crate::{
    error::AppResult,
    models::{Book, CreateBook, CreateReader, Reader},
    services::Services,
};

pub const HELP_TEXT: &str = "\
Available commands:
  add-book                                  add a new book (you will be asked for its details)
  add-reader                                add a new reader (you will be asked for their details)
  list-books [filters]                      list books; filters can be combined:
                                              -f-name <value>, -f-author <value>, -f-category <value>,
                                              -f-language <value>, -f-isbn <value>, -f-taken, -f-available
                                              values with spaces go in double quotes: -f-author \"Robert C. Martin\"
  list-readers                              list readers
  list-lendings                             list books that are currently lent
  delete-book <book id>                     delete a book that is not lent
  delete-reader <reader id>                 delete a reader who has no books taken
  take-book <book id> <reader id> <days>    lend a book to a reader
  return-book <book id>                     return a lent book
  help                                      show this help
  exit                                      leave the program";

const LATE_RETURN_NOTE: &str = "Hey, you are returning the book too late! But we will forgive you this time :)";

#[derive(Clone)]
pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Parse and run one line typed at the prompt
    pub async fn handle(&self, line: &str) -> Reply {
        match CommandParser::parse(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                tracing::warn!("Rejected command {:?}: {}", line, e);
                Reply::Message(e.user_message())
            }
        }
    }

    pub async fn execute(&self, command: Command) -> Reply {
        tracing::debug!("Executing {:?}", command);

        match command {
            Command::Empty => Reply::Nothing,
            Command::Exit => Reply::Exit,
            Command::Help => Reply::Message(HELP_TEXT.to_string()),
            Command::AddBook => Reply::Collect(Form::Book),
            Command::AddReader => Reply::Collect(Form::Reader),
            Command::ListBooks(filter) => Reply::Message(render(
                self.services.books.list_books(&filter).await,
                |books| listing(books, "No books with given criteria were found."),
            )),
            Command::ListReaders => Reply::Message(render(
                self.services.readers.list_readers().await,
                |readers| listing(readers, "No readers were found."),
            )),
            Command::ListLendings => {
                let now = self.services.lendings.now();
                Reply::Message(render(
                    self.services.lendings.list_open_lendings().await,
                    |lendings| {
                        if lendings.is_empty() {
                            return "No books are currently lent.".to_string();
                        }
                        lendings
                            .iter()
                            .map(|l| l.describe(now))
                            .collect::<Vec<_>>()
                            .join("\n")
                    },
                ))
            }
            Command::DeleteBook(id) => Reply::Message(render(
                self.services.books.delete_book(id).await,
                |_| "The book was successfully deleted.".to_string(),
            )),
            Command::DeleteReader(id) => Reply::Message(render(
                self.services.readers.delete_reader(id).await,
                |_| "The reader was successfully deleted.".to_string(),
            )),
            Command::TakeBook {
                book_id,
                reader_id,
                days,
            } => Reply::Message(render(
                self.services.lendings.take_book(book_id, reader_id, days).await,
                |lending| {
                    format!(
                        "The book was successfully lent. It has to be returned by {}.",
                        lending.lent_until.format("%Y-%m-%d")
                    )
                },
            )),
            Command::ReturnBook { book_id } => Reply::Message(render(
                self.services.lendings.return_book(book_id).await,
                |receipt| {
                    if receipt.late {
                        format!("{}\n\nThe book was successfully returned.", LATE_RETURN_NOTE)
                    } else {
                        "The book was successfully returned.".to_string()
                    }
                },
            )),
            Command::Unknown(name) => Reply::Message(format!(
                "Unknown command \"{}\". Type \"help\" to see the available commands.",
                name
            )),
        }
    }

    /// Finish a multi-prompt create with the collected answers
    pub async fn process_answers(&self, form: Form, answers: Vec<String>) -> String {
        match form {
            Form::Book => {
                match self.add_book(&answers).await {
                    Ok(book) => format!("The book was successfully added. Its ID is {}.", book.id),
                    Err(e) => {
                        tracing::warn!("Book not added: {}", e);
                        format!("The book could not be added. {}", e.user_message())
                    }
                }
            }
            Form::Reader => {
                match self.add_reader(&answers).await {
                    Ok(reader) => {
                        format!("The reader was successfully added. Their ID is {}.", reader.id)
                    }
                    Err(e) => {
                        tracing::warn!("Reader not added: {}", e);
                        format!("The reader could not be added. {}", e.user_message())
                    }
                }
            }
        }
    }

    async fn add_book(&self, answers: &[String]) -> AppResult<Book> {
        let request = CreateBook::from_answers(answers)?;
        self.services.books.add_book(request).await
    }

    async fn add_reader(&self, answers: &[String]) -> AppResult<Reader> {
        let request = CreateReader::from_answers(answers)?;
        self.services.readers.add_reader(request).await
    }
}

fn render<T>(result: AppResult<T>, on_success: impl FnOnce(T) -> String) -> String {
    match result {
        Ok(value) => on_success(value),
        Err(e) => e.user_message(),
    }
}

fn listing<T: Display>(items: Vec<T>, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
