//! Business logic services

pub mod books;
pub mod lendings;
pub mod readers;

use std::sync::Arc;

use crate::{clock::Clock, config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub readers: readers::ReadersService,
    pub lendings: lendings::LendingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending_config: LendingConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            readers: readers::ReadersService::new(repository.clone()),
            lendings: lendings::LendingsService::new(repository, lending_config, clock),
        }
    }
}
