use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::{DataResponse, NewBookDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::validation::{FieldError, into_result, require_not_blank, require_present, Validate};

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookCommandRequest {
    pub isbn: Option<i64>,
    #[serde(alias = "bookTitle")]
    pub title: Option<String>,
    #[serde(alias = "bookAuthor")]
    pub author: Option<String>,
}

impl AddBookCommandRequest {
    pub fn new(isbn: i64, title: &str, author: &str) -> Self {
        Self {
            isbn: Some(isbn),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
        }
    }

    pub fn build_book(&self) -> Result<NewBookDto, CommandError> {
        self.validate().map_err(CommandError::invalid_request)?;
        match (self.isbn, self.title.as_deref(), self.author.as_deref()) {
            (Some(isbn), Some(title), Some(author)) => Ok(NewBookDto::new(isbn, title, author)),
            _ => Err(CommandError::invalid_request(vec![])),
        }
    }
}

impl Validate for AddBookCommandRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = vec![];
        require_present("isbn", &self.isbn, &mut errors);
        require_not_blank("title", &self.title, &mut errors);
        require_not_blank("author", &self.author, &mut errors);
        into_result(errors)
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, DataResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<DataResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(&book).await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::ResponseData;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    lazy_static! {
        static ref SVC: AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
                Arc::from(factory::create_catalog_service(&Configuration::new("test")).await)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = AddBookCommand::new(SVC.get().await.clone());

        let res = cmd.execute(AddBookCommandRequest::new(9780439708180, "Harry Potter and the Sorcerer's Stone (#1)", "J.K. Rowling"))
            .await.expect("should add book");
        match res.data {
            ResponseData::Book(book) => assert_eq!(9780439708180, book.isbn),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_reject_missing_title() {
        let cmd = AddBookCommand::new(SVC.get().await.clone());

        let req = AddBookCommandRequest { isbn: Some(1), title: None, author: Some("author".to_string()) };
        match cmd.execute(req).await {
            Err(CommandError::Validation { errors, .. }) => {
                assert_eq!(1, errors.len());
                assert_eq!("title", errors[0].field.as_str());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_parse_legacy_field_names() {
        let req: AddBookCommandRequest = serde_json::from_str(
            r#"{"isbn": 9780062315007, "bookTitle": "The Alchemist", "bookAuthor": "Paulo Coelho"}"#)
            .expect("should parse request");
        let book = req.build_book().expect("should build book");
        assert_eq!("The Alchemist", book.title.as_str());
        assert_eq!("Paulo Coelho", book.author.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_blank_fields() {
        let req: AddBookCommandRequest = serde_json::from_str(r#"{"title": " ", "author": ""}"#)
            .expect("should parse request");
        match req.build_book() {
            Err(CommandError::Validation { errors, .. }) => assert_eq!(3, errors.len()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
