//! Reader management service

use crate::{
    error::{AppError, AppResult},
    models::{CreateReader, Reader},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_readers(&self) -> AppResult<Vec<Reader>> {
        self.repository.readers.get_all().await
    }

    /// Validate and store a new reader
    pub async fn add_reader(&self, request: CreateReader) -> AppResult<Reader> {
        let reader = request.into_reader()?;
        let reader = self.repository.readers.add(reader).await?;
        tracing::info!("Reader added: id={}", reader.id);
        Ok(reader)
    }

    /// Delete a reader who has returned every book
    pub async fn delete_reader(&self, id: i32) -> AppResult<Reader> {
        let reader = self
            .repository
            .readers
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("The reader with given ID does not exist.".to_string()))?;

        if reader.taken_books_count > 0 {
            return Err(AppError::BusinessRule(
                "The reader could not be deleted, as they have not returned one or more books."
                    .to_string(),
            ));
        }

        self.repository.readers.delete(id).await?;
        tracing::info!("Reader deleted: id={}", id);
        Ok(reader)
    }
}
