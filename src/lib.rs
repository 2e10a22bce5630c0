//! Book Library
//!
//! An interactive console for tracking books, readers and lendings. Each
//! collection lives in its own JSON file under the data directory and is
//! rewritten in full on every change.

pub mod clock;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
