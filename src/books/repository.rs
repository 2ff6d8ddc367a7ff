pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // inserts the book unless a stored book already has its isbn, in which case
    // DuplicateKey is returned; the check and the insert happen atomically
    async fn create_unique_isbn(&self, entity: &BookEntity) -> LibraryResult<BookEntity>;

    // first book stored with the isbn, if any
    async fn find_by_isbn(&self, isbn: i64) -> LibraryResult<Option<BookEntity>>;

    // books whose author matches exactly, case-sensitive
    async fn find_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>>;

    // all books, highest isbn first
    async fn find_all_order_by_isbn_desc(&self) -> LibraryResult<Vec<BookEntity>>;
}

// isbn descending, equal isbns keep insertion order by book_id
pub(crate) fn sort_by_isbn_desc(books: &mut [BookEntity]) {
    books.sort_by(|a, b| b.isbn.cmp(&a.isbn).then(a.book_id.cmp(&b.book_id)));
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::sort_by_isbn_desc;

    #[tokio::test]
    async fn test_should_sort_by_isbn_desc() {
        let mut books = vec![(1, 10), (2, 30), (3, 20), (4, 30)].into_iter().map(|(id, isbn)| {
            let mut book = BookEntity::new(isbn, "title", "author");
            book.book_id = id;
            book
        }).collect::<Vec<BookEntity>>();
        sort_by_isbn_desc(&mut books);
        let ids = books.iter().map(|b| b.book_id).collect::<Vec<i64>>();
        assert_eq!(vec![2, 4, 3, 1], ids);
    }
}
