use async_trait::async_trait;
use crate::core::library::LibraryError;
use crate::core::validation::FieldError;

#[derive(Debug)]
pub enum CommandError {
    Conflict {
        message: String,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
}

impl CommandError {
    pub fn invalid_request(errors: Vec<FieldError>) -> Self {
        let message = errors.iter().map(FieldError::to_string).collect::<Vec<String>>().join(", ");
        CommandError::Validation { message, errors }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Conflict { message } => {
                CommandError::Conflict { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;
    use crate::core::validation::FieldError;

    #[tokio::test]
    async fn test_should_build_invalid_request() {
        let err = CommandError::invalid_request(vec![
            FieldError::new("title", "must not be blank"),
            FieldError::new("isbn", "must not be null"),
        ]);
        match err {
            CommandError::Validation { message, errors } => {
                assert_eq!("title must not be blank, isbn must not be null", message.as_str());
                assert_eq!(2, errors.len());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_convert_library_error() {
        assert!(matches!(CommandError::from(LibraryError::not_found("test")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::conflict("test")), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("test")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::database("test", None, false)), CommandError::Database { .. }));
        assert!(matches!(CommandError::from(LibraryError::unavailable("test", None, true)), CommandError::Runtime { retryable: true, .. }));
        assert!(matches!(CommandError::from(LibraryError::serialization("test")), CommandError::Serialization { .. }));
        assert!(matches!(CommandError::from(LibraryError::runtime("books lock poisoned", None)), CommandError::Runtime { retryable: false, .. }));
    }
}
