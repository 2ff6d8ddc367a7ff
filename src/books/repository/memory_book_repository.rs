use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::{BookRepository, sort_by_isbn_desc};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

#[derive(Debug, Default)]
struct BookTable {
    last_id: i64,
    rows: BTreeMap<i64, BookEntity>,
}

impl BookTable {
    fn insert(&mut self, entity: &BookEntity) -> BookEntity {
        self.last_id += 1;
        let now = Utc::now().naive_utc();
        let stored = BookEntity {
            book_id: self.last_id,
            version: 0,
            created_at: now,
            updated_at: now,
            ..entity.clone()
        };
        self.rows.insert(stored.book_id, stored.clone());
        stored
    }
}

/// In-process book store. Every write runs under a single write lock so that the
/// version check and the mutation cannot interleave with another request.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    table: RwLock<BookTable>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LibraryResult<RwLockReadGuard<'_, BookTable>> {
        self.table.read().map_err(|_| LibraryError::runtime("books lock poisoned", None))
    }

    fn write(&self) -> LibraryResult<RwLockWriteGuard<'_, BookTable>> {
        self.table.write().map_err(|_| LibraryError::runtime("books lock poisoned", None))
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        Ok(self.write()?.insert(entity))
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut table = self.write()?;
        let row = table.rows.get_mut(&entity.id())
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", entity.id()).as_str()))?;
        if row.version != entity.version() {
            return Err(LibraryError::conflict(
                format!("book {} was modified, expected version {} but found {}",
                        entity.id(), entity.version(), row.version).as_str()));
        }
        row.isbn = entity.isbn;
        row.title = entity.title.to_string();
        row.author = entity.author.to_string();
        row.version += 1;
        row.updated_at = Utc::now().naive_utc();
        Ok(row.clone())
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.read()?.rows.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<()> {
        self.write()?.rows.remove(&id).map(|_| ())
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn create_unique_isbn(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut table = self.write()?;
        if table.rows.values().any(|b| b.isbn == entity.isbn) {
            return Err(LibraryError::duplicate_key(format!("isbn {} already stored", entity.isbn).as_str()));
        }
        Ok(table.insert(entity))
    }

    async fn find_by_isbn(&self, isbn: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.read()?.rows.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn find_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.read()?.rows.values().filter(|b| b.author == author).cloned().collect())
    }

    async fn find_all_order_by_isbn_desc(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = self.find_all().await?;
        sort_by_isbn_desc(&mut books);
        Ok(books)
    }
}
