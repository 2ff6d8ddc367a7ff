use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::DataResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct GetAllBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetAllBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct GetAllBooksCommandRequest {}

#[async_trait]
impl Command<GetAllBooksCommandRequest, DataResponse> for GetAllBooksCommand {
    async fn execute(&self, _req: GetAllBooksCommandRequest) -> Result<DataResponse, CommandError> {
        self.catalog_service.get_all_books().await.map_err(CommandError::from)
    }
}
