use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::DataResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RemoveBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct RemoveBookCommandRequest {
    pub book_id: i64,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, DataResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<DataResponse, CommandError> {
        self.catalog_service.delete_book(req.book_id).await
            .map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::{DataResponse, ResponseData};
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
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
    async fn test_should_run_remove_book() {
        let add_cmd = AddBookCommand::new(SVC.get().await.clone());
        let remove_cmd = RemoveBookCommand::new(SVC.get().await.clone());

        let res = add_cmd.execute(AddBookCommandRequest::new(9780062315007, "The Alchemist", "Paulo Coelho"))
            .await.expect("should add book");
        let book_id = match res.data {
            ResponseData::Book(book) => book.book_id,
            other => panic!("unexpected {:?}", other),
        };
        let res = remove_cmd.execute(RemoveBookCommandRequest::new(book_id)).await.expect("should remove book");
        assert_eq!(DataResponse::message(format!("Successfully Delete Book with bookId {}", book_id)), res);

        let res = remove_cmd.execute(RemoveBookCommandRequest::new(book_id)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
