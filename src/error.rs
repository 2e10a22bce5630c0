//! Error types for the book library

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown at the prompt for this error.
    ///
    /// Domain errors carry a sentence meant for the user. Storage and
    /// internal failures are logged and replaced by a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::BusinessRule(msg) => msg.clone(),
            AppError::Io(e) => {
                tracing::error!("Storage error: {:?}", e);
                "The operation failed because the library data could not be accessed.".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "The operation failed because the library data is corrupted.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "The operation failed. Unexpected error occurred.".to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_show_their_message() {
        let err = AppError::NotFound("The book was not found.".to_string());
        assert_eq!(err.user_message(), "The book was not found.");

        let err = AppError::BusinessRule("The book could not be deleted, as it is lent.".to_string());
        assert_eq!(err.user_message(), "The book could not be deleted, as it is lent.");
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let msg = err.user_message();
        assert!(!msg.contains("denied"));
        assert!(msg.contains("could not be accessed"));
    }
}
