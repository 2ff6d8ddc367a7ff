use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

// AppState is shared by all handlers, the catalog service is built once at startup
#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: Configuration, catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            config,
            catalog_service,
        }
    }
}

/// Failure of a request; rendered as the bare status code with an empty body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerError(pub StatusCode);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Conflict { .. } | CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            // request bodies are parsed before a command runs, so this is a stored record
            CommandError::Serialization { .. }
            | CommandError::Database { .. }
            | CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed {:?}", err);
        } else {
            tracing::debug!(status = status.as_u16(), "request rejected {:?}", err);
        }
        ServerError(status)
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!(%err, "malformed request body");
        ServerError(StatusCode::BAD_REQUEST)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(%err, "rejected request body");
        ServerError(StatusCode::BAD_REQUEST)
    }
}

impl From<PathRejection> for ServerError {
    fn from(err: PathRejection) -> Self {
        tracing::debug!(%err, "rejected request path");
        ServerError(StatusCode::BAD_REQUEST)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;
    use crate::core::library::LibraryError;
    use crate::core::validation::FieldError;

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let err = CommandError::invalid_request(vec![FieldError::new("title", "must not be blank")]);
        assert_eq!(ServerError(StatusCode::BAD_REQUEST), ServerError::from(err));
        let err = CommandError::NotFound { message: "missing".to_string() };
        assert_eq!(ServerError(StatusCode::NOT_FOUND), ServerError::from(err));
        let err = CommandError::Conflict { message: "stale".to_string() };
        assert_eq!(ServerError(StatusCode::CONFLICT), ServerError::from(err));
        let err = CommandError::DuplicateKey { message: "dup".to_string() };
        assert_eq!(ServerError(StatusCode::CONFLICT), ServerError::from(err));
        let err = CommandError::Database { message: "down".to_string(), reason_code: None, retryable: true };
        assert_eq!(ServerError(StatusCode::INTERNAL_SERVER_ERROR), ServerError::from(err));
    }

    #[tokio::test]
    async fn test_should_map_store_faults_to_server_error() {
        let err = CommandError::from(LibraryError::from("unsupported attribute".to_string()));
        assert_eq!(ServerError(StatusCode::INTERNAL_SERVER_ERROR), ServerError::from(err));
        let err = CommandError::from(LibraryError::serialization("book record json"));
        assert_eq!(ServerError(StatusCode::INTERNAL_SERVER_ERROR), ServerError::from(err));
        let err = CommandError::from(LibraryError::runtime("books lock poisoned", None));
        assert_eq!(ServerError(StatusCode::INTERNAL_SERVER_ERROR), ServerError::from(err));
    }

    #[tokio::test]
    async fn test_should_map_malformed_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        assert_eq!(ServerError(StatusCode::BAD_REQUEST), ServerError::from(err));
    }
}
