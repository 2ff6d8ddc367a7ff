use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::DataResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::validation::{FieldError, into_result, require_not_blank, Validate};

pub struct FindBooksByAuthorCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl FindBooksByAuthorCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindBooksByAuthorCommandRequest {
    #[serde(alias = "bookAuthor")]
    pub author: Option<String>,
}

impl FindBooksByAuthorCommandRequest {
    pub fn new(author: &str) -> Self {
        Self {
            author: Some(author.to_string()),
        }
    }
}

impl Validate for FindBooksByAuthorCommandRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = vec![];
        require_not_blank("author", &self.author, &mut errors);
        into_result(errors)
    }
}

#[async_trait]
impl Command<FindBooksByAuthorCommandRequest, DataResponse> for FindBooksByAuthorCommand {
    async fn execute(&self, req: FindBooksByAuthorCommandRequest) -> Result<DataResponse, CommandError> {
        req.validate().map_err(CommandError::invalid_request)?;
        let author = req.author.unwrap_or_default();
        self.catalog_service.find_all_books_from_author(author.as_str()).await.map_err(CommandError::from)
    }
}
