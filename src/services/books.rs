//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books matching every criterion of `filter`
    pub async fn list_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let books = self.repository.books.get_all().await?;
        Ok(books.into_iter().filter(|b| filter.matches(b)).collect())
    }

    /// Validate and store a new book
    pub async fn add_book(&self, request: CreateBook) -> AppResult<Book> {
        let book = request.into_book()?;
        let book = self.repository.books.add(book).await?;
        tracing::info!("Book added: id={} name={:?}", book.id, book.name);
        Ok(book)
    }

    /// Delete a book that is not currently lent
    pub async fn delete_book(&self, id: i32) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("The book with given ID does not exist.".to_string()))?;

        if book.is_lent {
            return Err(AppError::BusinessRule(
                "The book could not be deleted, as it is lent.".to_string(),
            ));
        }

        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(book)
    }
}
