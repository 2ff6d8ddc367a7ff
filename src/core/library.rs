use std::fmt;
use std::fmt::{Display, Formatter};

// LibraryError is raised by repositories and the catalog service
#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // An insert hit a key or isbn that is already stored.
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The record exists but its version moved between read and write.
    Conflict {
        message: String,
    },
    // The store throttled or could not be reached.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // A stored record could not be converted to or from the store format.
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn conflict(message: &str) -> LibraryError {
        LibraryError::Conflict { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    // Throttling and transport failures become CurrentlyUnavailable, the rest Database.
    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(format!("dynamodb unavailable: {}", message).as_str(), reason, true)
        } else {
            LibraryError::database(format!("dynamodb failure: {}", message).as_str(), reason, false)
        }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(format!("book record json: {}", err).as_str())
    }
}

// parse_item reports unsupported attribute shapes as plain strings
impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(format!("book record attributes: {}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, .. }
            | LibraryError::CurrentlyUnavailable { message, reason_code, .. }
            | LibraryError::Runtime { message, reason_code } => match reason_code {
                Some(reason) => write!(f, "{} ({})", message, reason),
                None => write!(f, "{}", message),
            },
            LibraryError::DuplicateKey { message }
            | LibraryError::NotFound { message }
            | LibraryError::Conflict { message }
            | LibraryError::Serialization { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the catalog and its repositories.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_pick_unavailable_for_retryable_failures() {
        let err = LibraryError::database_or_unavailable("throttled", Some("400 Bad Request".to_string()), true);
        assert!(matches!(err, LibraryError::CurrentlyUnavailable { retryable: true, .. }));
        let err = LibraryError::database_or_unavailable("bad table", Some("400 Bad Request".to_string()), false);
        assert!(matches!(err, LibraryError::Database { retryable: false, .. }));
        let err = LibraryError::database_or_unavailable("bad table", None, false);
        assert!(matches!(err, LibraryError::Database { reason_code: None, .. }));
    }

    #[tokio::test]
    async fn test_should_format_error() {
        assert_eq!("book 3 not found", LibraryError::not_found("book 3 not found").to_string());
        assert_eq!("dynamodb failure: bad table (ValidationException)",
                   LibraryError::database_or_unavailable("bad table", Some("ValidationException".to_string()), false).to_string());
        assert_eq!("books lock poisoned", LibraryError::runtime("books lock poisoned", None).to_string());
    }

    #[tokio::test]
    async fn test_should_convert_record_errors() {
        let err = serde_json::from_str::<i64>("not a number").expect_err("should fail");
        assert!(matches!(LibraryError::from(err), LibraryError::Serialization { .. }));
        assert!(matches!(LibraryError::from("unsupported attribute".to_string()), LibraryError::Serialization { .. }));
    }
}
