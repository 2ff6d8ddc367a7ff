use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::{BookDto, DataResponse};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::validation::{FieldError, into_result, require_not_blank, require_present, Validate};

pub struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookCommandRequest {
    pub book_id: Option<i64>,
    pub isbn: Option<i64>,
    #[serde(alias = "bookTitle")]
    pub title: Option<String>,
    #[serde(alias = "bookAuthor")]
    pub author: Option<String>,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, isbn: i64, title: &str, author: &str) -> Self {
        Self {
            book_id: Some(book_id),
            isbn: Some(isbn),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
        }
    }

    pub fn build_book(&self) -> Result<BookDto, CommandError> {
        self.validate().map_err(CommandError::invalid_request)?;
        match (self.book_id, self.isbn, self.title.as_deref(), self.author.as_deref()) {
            (Some(book_id), Some(isbn), Some(title), Some(author)) => Ok(BookDto::new(book_id, isbn, title, author)),
            _ => Err(CommandError::invalid_request(vec![])),
        }
    }
}

impl Validate for UpdateBookCommandRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = vec![];
        require_present("bookId", &self.book_id, &mut errors);
        require_present("isbn", &self.isbn, &mut errors);
        require_not_blank("title", &self.title, &mut errors);
        require_not_blank("author", &self.author, &mut errors);
        into_result(errors)
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, DataResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<DataResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.update_book(&book).await.map_err(CommandError::from)
    }
}
