//! Error types for tsearch.

use thiserror::Error;

/// Result type alias using tsearch's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tsearch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Statement execution failed (wraps sqlx::Error).
    ///
    /// This crate does not execute queries itself; callers that run a
    /// generated query report engine failures through this variant so
    /// that dynamic dispatch can classify them.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A dynamic search method name did not resolve.
    #[error("No search method: {0}")]
    MethodNotFound(String),

    /// A column name is not known on the target table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A search specification contained no terms.
    #[error("Empty search specification")]
    EmptySpec,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_method_not_found() {
        let err = Error::MethodNotFound("search_by_nothing".to_string());
        assert_eq!(err.to_string(), "No search method: search_by_nothing");
    }

    #[test]
    fn test_error_display_unknown_column() {
        let err = Error::UnknownColumn("missing".to_string());
        assert_eq!(err.to_string(), "Unknown column: missing");
    }

    #[test]
    fn test_error_display_empty_spec() {
        let err = Error::EmptySpec;
        assert_eq!(err.to_string(), "Empty search specification");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("not an object".to_string());
        assert_eq!(err.to_string(), "Invalid input: not an object");
    }

    #[test]
    fn test_error_display_database() {
        let err = Error::Database(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        match err {
            Error::Database(_) => {}
            _ => panic!("Expected Database error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::InvalidInput(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
