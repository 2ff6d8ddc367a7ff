use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::DataResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct FindBooksOrderedByIsbnCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl FindBooksOrderedByIsbnCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct FindBooksOrderedByIsbnCommandRequest {}

#[async_trait]
impl Command<FindBooksOrderedByIsbnCommandRequest, DataResponse> for FindBooksOrderedByIsbnCommand {
    async fn execute(&self, _req: FindBooksOrderedByIsbnCommandRequest) -> Result<DataResponse, CommandError> {
        self.catalog_service.find_all_books_order_by_isbn().await.map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::dto::ResponseData;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::find_books_ordered_by_isbn_cmd::{FindBooksOrderedByIsbnCommand, FindBooksOrderedByIsbnCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_find_books_ordered_by_isbn() {
        let svc: Arc<dyn CatalogService> = Arc::from(factory::create_catalog_service(&Configuration::new("test")).await);
        let add_cmd = AddBookCommand::new(svc.clone());
        let ordered_cmd = FindBooksOrderedByIsbnCommand::new(svc);

        for isbn in [9780062315007, 9780439708180, 9780441172719] {
            let _ = add_cmd.execute(AddBookCommandRequest::new(isbn, "title", "author")).await.expect("should add book");
        }
        let res = ordered_cmd.execute(FindBooksOrderedByIsbnCommandRequest::default()).await.expect("should list books");
        match res.data {
            ResponseData::Books(books) => {
                let isbns = books.iter().map(|b| b.isbn).collect::<Vec<i64>>();
                assert_eq!(vec![9780441172719, 9780439708180, 9780062315007], isbns);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
