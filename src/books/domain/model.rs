use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is the persisted book record. The store owns book_id, version and the
// timestamps; callers only ever set isbn, title and author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub version: i64,
    pub isbn: i64,
    pub title: String,
    pub author: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: i64, title: &str, author: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            book_id: 0,
            version: 0,
            isbn,
            title: title.to_string(),
            author: author.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
