use serde::{Deserialize, Serialize};

// BookDto is the public view of a book, it never carries storage timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub book_id: i64,
    pub isbn: i64,
    pub title: String,
    pub author: String,
}

impl BookDto {
    pub fn new(book_id: i64, isbn: i64, title: &str, author: &str) -> BookDto {
        BookDto {
            book_id,
            isbn,
            title: title.to_string(),
            author: author.to_string(),
        }
    }
}

// NewBookDto carries the business fields of a book that has no identity yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookDto {
    pub isbn: i64,
    pub title: String,
    pub author: String,
}

impl NewBookDto {
    pub fn new(isbn: i64, title: &str, author: &str) -> NewBookDto {
        NewBookDto {
            isbn,
            title: title.to_string(),
            author: author.to_string(),
        }
    }
}

/// Payload of every successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Book(BookDto),
    Books(Vec<BookDto>),
    Message(String),
}

/// The `{"data": ...}` envelope returned by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse {
    pub data: ResponseData,
}

impl DataResponse {
    pub fn book(book: BookDto) -> Self {
        Self { data: ResponseData::Book(book) }
    }

    pub fn books(books: Vec<BookDto>) -> Self {
        Self { data: ResponseData::Books(books) }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self { data: ResponseData::Message(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::dto::{BookDto, DataResponse};

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new(1, 9780062315007, "The Alchemist", "Paulo Coelho");
        assert_eq!(9780062315007, book.isbn);
        assert_eq!("The Alchemist", book.title.as_str());
        assert_eq!("Paulo Coelho", book.author.as_str());
    }

    #[tokio::test]
    async fn test_should_serialize_envelope() {
        let book = BookDto::new(3, 9780439708180, "Harry Potter and the Sorcerer's Stone (#1)", "J.K. Rowling");
        let res = serde_json::to_value(DataResponse::book(book.clone())).expect("should serialize");
        assert_eq!(json!({"data": {
            "bookId": 3,
            "isbn": 9780439708180_i64,
            "title": "Harry Potter and the Sorcerer's Stone (#1)",
            "author": "J.K. Rowling"}}), res);

        let res = serde_json::to_value(DataResponse::books(vec![book])).expect("should serialize");
        assert_eq!(1, res["data"].as_array().expect("should be array").len());

        let res = serde_json::to_value(DataResponse::books(vec![])).expect("should serialize");
        assert_eq!(json!({"data": []}), res);

        let res = serde_json::to_value(DataResponse::message("Successfully Delete Book with bookId 3")).expect("should serialize");
        assert_eq!(json!({"data": "Successfully Delete Book with bookId 3"}), res);
    }
}
