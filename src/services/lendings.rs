//! Lending service: taking and returning books

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    clock::Clock,
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Lending, ReturnReceipt},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingsService {
    repository: Repository,
    config: LendingConfig,
    clock: Arc<dyn Clock>,
}

impl LendingsService {
    pub fn new(repository: Repository, config: LendingConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Lend a book to a reader for `days` days.
    ///
    /// Nothing is written unless every rule passes.
    pub async fn take_book(&self, book_id: i32, reader_id: i32, days: i64) -> AppResult<Lending> {
        let mut book = self
            .repository
            .books
            .get(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("The book was not found.".to_string()))?;

        let mut reader = self
            .repository
            .readers
            .get(reader_id)
            .await?
            .ok_or_else(|| AppError::NotFound("The reader was not found.".to_string()))?;

        if book.is_lent {
            return Err(AppError::BusinessRule(
                "The book could not be lent. It is already lent to another reader.".to_string(),
            ));
        }

        if reader.taken_books_count >= self.config.max_books_per_reader {
            return Err(AppError::BusinessRule(
                "The book could not be lent. The reader has already taken the permissible number of books."
                    .to_string(),
            ));
        }

        if days <= 0 || days > i64::from(self.config.max_period_days) {
            return Err(AppError::BusinessRule(format!(
                "The book could not be lent. Invalid lending period, it must be between 1 and {} days.",
                self.config.max_period_days
            )));
        }

        let now = self.clock.now();

        book.is_lent = true;
        reader.taken_books_count += 1;

        self.repository.books.update(&book).await?;
        self.repository.readers.update(&reader).await?;
        let lending = self
            .repository
            .lendings
            .add(Lending {
                id: 0,
                book_id,
                reader_id,
                lending_date: now,
                lent_until: now + Duration::days(days),
                return_date: None,
            })
            .await?;

        tracing::info!(
            "Book lent: lending={} book={} reader={} until={}",
            lending.id,
            book_id,
            reader_id,
            lending.lent_until
        );
        Ok(lending)
    }

    /// Close the open lending of a book
    pub async fn return_book(&self, book_id: i32) -> AppResult<ReturnReceipt> {
        let mut lending = self
            .repository
            .lendings
            .find_open_for_book(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("The lending was not found.".to_string()))?;

        match self.repository.readers.get(lending.reader_id).await? {
            Some(mut reader) => {
                reader.taken_books_count = reader.taken_books_count.saturating_sub(1);
                self.repository.readers.update(&reader).await?;
            }
            None => tracing::warn!(
                "Reader {} of lending {} no longer exists",
                lending.reader_id,
                lending.id
            ),
        }

        match self.repository.books.get(book_id).await? {
            Some(mut book) => {
                book.is_lent = false;
                self.repository.books.update(&book).await?;
            }
            None => tracing::warn!("Book {} of lending {} no longer exists", book_id, lending.id),
        }

        let now = self.clock.now();
        lending.return_date = Some(now);
        self.repository.lendings.update(&lending).await?;

        let late = now > lending.lent_until;
        tracing::info!(
            "Book returned: lending={} book={} late={}",
            lending.id,
            book_id,
            late
        );
        Ok(ReturnReceipt { lending, late })
    }

    /// Lendings not returned yet
    pub async fn list_open_lendings(&self) -> AppResult<Vec<Lending>> {
        self.repository.lendings.get_open().await
    }
}
