use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::DataResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct GetBookCommandRequest {
    pub book_id: i64,
}

impl GetBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, DataResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<DataResponse, CommandError> {
        self.catalog_service.get_book(req.book_id)
            .await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::{DataResponse, ResponseData};
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
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
    async fn test_should_run_get_book() {
        let add_cmd = AddBookCommand::new(SVC.get().await.clone());
        let get_cmd = GetBookCommand::new(SVC.get().await.clone());

        let res = add_cmd.execute(AddBookCommandRequest::new(9780062315007, "The Alchemist", "Paulo Coelho"))
            .await.expect("should add book");
        let book = match res.data {
            ResponseData::Book(book) => book,
            other => panic!("unexpected {:?}", other),
        };
        let loaded = get_cmd.execute(GetBookCommandRequest::new(book.book_id)).await.expect("should get book");
        assert_eq!(DataResponse::book(book), loaded);
    }

    #[tokio::test]
    async fn test_should_not_get_missing_book() {
        let get_cmd = GetBookCommand::new(SVC.get().await.clone());
        let res = get_cmd.execute(GetBookCommandRequest::new(9999)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
