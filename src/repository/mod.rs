//! Repository layer over the JSON data files

pub mod json_file;
pub mod lendings;

use std::path::Path;

use crate::{
    error::AppResult,
    models::{Book, Reader},
};

pub use json_file::JsonRepository;
pub use lendings::LendingsRepository;

pub type BooksRepository = JsonRepository<Book>;
pub type ReadersRepository = JsonRepository<Reader>;

const LAST_IDS_DIR: &str = "last_ids";

/// Main repository struct holding one repository per collection
#[derive(Clone)]
pub struct Repository {
    pub books: BooksRepository,
    pub readers: ReadersRepository,
    pub lendings: LendingsRepository,
}

impl Repository {
    /// Create a repository rooted at `data_dir`, creating the directory layout
    pub async fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref();
        let last_ids = data_dir.join(LAST_IDS_DIR);
        tokio::fs::create_dir_all(&last_ids).await?;

        tracing::info!("Using library data in {}", data_dir.display());

        Ok(Self {
            books: BooksRepository::new(data_dir.join("books.json"), last_ids.join("last_book_id.txt")),
            readers: ReadersRepository::new(
                data_dir.join("readers.json"),
                last_ids.join("last_reader_id.txt"),
            ),
            lendings: LendingsRepository::new(
                data_dir.join("lendings.json"),
                last_ids.join("last_lending_id.txt"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("library");

        let repository = Repository::open(&root).await.unwrap();
        assert!(root.join(LAST_IDS_DIR).is_dir());
        assert!(repository.books.get_all().await.unwrap().is_empty());
        assert!(root.join("books.json").is_file());
    }
}
