//! Data models for the book library

pub mod book;
pub mod lending;
pub mod reader;

use serde::{de::DeserializeOwned, Serialize};

// Re-export commonly used types
pub use book::{Book, BookCriterion, BookField, BookFilter, CreateBook};
pub use lending::{Lending, ReturnReceipt};
pub use reader::{CreateReader, Reader};

/// A record persisted by a file-backed repository.
///
/// Ids are assigned by the repository on insert; a freshly built record
/// carries id 0 until then.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}
