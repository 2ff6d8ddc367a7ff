pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, DataResponse, NewBookDto};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &NewBookDto) -> LibraryResult<DataResponse>;
    async fn get_all_books(&self) -> LibraryResult<DataResponse>;
    async fn get_book(&self, id: i64) -> LibraryResult<DataResponse>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<DataResponse>;
    async fn delete_book(&self, id: i64) -> LibraryResult<DataResponse>;
    async fn find_all_books_from_author(&self, author: &str) -> LibraryResult<DataResponse>;
    async fn find_all_books_order_by_isbn(&self) -> LibraryResult<DataResponse>;
}
