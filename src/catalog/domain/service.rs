use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, DataResponse, NewBookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // A duplicate isbn is answered with a message instead of an error.
    async fn add_book(&self, book: &NewBookDto) -> LibraryResult<DataResponse> {
        match self.book_repository.create_unique_isbn(&BookEntity::from(book)).await {
            Ok(added) => {
                tracing::info!(book_id = added.book_id, isbn = added.isbn, "book added");
                Ok(DataResponse::book(BookDto::from(&added)))
            }
            Err(LibraryError::DuplicateKey { .. }) => {
                let message = format!("Book with isbn {} already exist", book.isbn);
                tracing::warn!(isbn = book.isbn, "{}", message);
                Ok(DataResponse::message(message))
            }
            Err(err) => Err(err),
        }
    }

    async fn get_all_books(&self) -> LibraryResult<DataResponse> {
        let books = self.book_repository.find_all().await?;
        tracing::info!(total = books.len(), "books found");
        Ok(DataResponse::books(books.iter().map(BookDto::from).collect()))
    }

    async fn get_book(&self, id: i64) -> LibraryResult<DataResponse> {
        let book = self.book_repository.get(id).await?;
        tracing::info!(book_id = id, "book found");
        Ok(DataResponse::book(BookDto::from(&book)))
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<DataResponse> {
        let mut existing = self.book_repository.get(book.book_id).await?;
        existing.isbn = book.isbn;
        existing.title = book.title.to_string();
        existing.author = book.author.to_string();
        let updated = self.book_repository.update(&existing).await?;
        tracing::info!(book_id = updated.book_id, version = updated.version, "book updated");
        Ok(DataResponse::book(BookDto::from(&updated)))
    }

    async fn delete_book(&self, id: i64) -> LibraryResult<DataResponse> {
        let _ = self.book_repository.get(id).await?;
        self.book_repository.delete(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(DataResponse::message(format!("Successfully Delete Book with bookId {}", id)))
    }

    async fn find_all_books_from_author(&self, author: &str) -> LibraryResult<DataResponse> {
        let books = self.book_repository.find_by_author(author).await?;
        tracing::info!(total = books.len(), author, "books found from author");
        Ok(DataResponse::books(books.iter().map(BookDto::from).collect()))
    }

    async fn find_all_books_order_by_isbn(&self) -> LibraryResult<DataResponse> {
        let books = self.book_repository.find_all_order_by_isbn_desc().await?;
        tracing::info!(total = books.len(), "books found ordered by isbn");
        Ok(DataResponse::books(books.iter().map(BookDto::from).collect()))
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            isbn: other.isbn,
            title: other.title.to_string(),
            author: other.author.to_string(),
        }
    }
}

impl From<&NewBookDto> for BookEntity {
    fn from(other: &NewBookDto) -> Self {
        BookEntity::new(other.isbn, other.title.as_str(), other.author.as_str())
    }
}
