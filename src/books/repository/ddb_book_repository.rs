use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ConditionCheck, Put, ReturnValue, TransactWriteItem};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::{BookRepository, sort_by_isbn_desc};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{is_conditional_delete_failure, is_conditional_put_failure, is_conditional_update_failure, is_transaction_canceled, number, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date};

// DDBBookRepository keeps books in a table keyed by numeric book_id. Ids come from an
// atomic counter item in a separate sequence table.
#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    sequence_table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, sequence_table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            sequence_table_name: sequence_table_name.to_string(),
        }
    }

    pub(crate) fn author_index(table_name: &str) -> String {
        format!("{}_author_ndx", table_name)
    }

    pub(crate) fn isbn_index(table_name: &str) -> String {
        format!("{}_isbn_ndx", table_name)
    }

    async fn next_id(&self) -> LibraryResult<i64> {
        let out = self.client
            .update_item()
            .table_name(self.sequence_table_name.as_str())
            .key("sequence_name", AttributeValue::S(self.table_name.to_string()))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", number(1))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await?;
        let id = out.attributes().map(|attrs| parse_number_attribute("next_id", attrs)).unwrap_or(0);
        if id <= 0 {
            return Err(LibraryError::database(
                format!("sequence {} returned no id", self.table_name).as_str(), None, false));
        }
        Ok(id)
    }

    async fn new_record(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let book_id = self.next_id().await?;
        let now = Utc::now().naive_utc();
        Ok(BookEntity {
            book_id,
            version: 0,
            created_at: now,
            updated_at: now,
            ..entity.clone()
        })
    }

    // isbn claims live in the sequence table next to the id counter
    fn isbn_claim_key(&self, isbn: i64) -> String {
        format!("{}#isbn#{}", self.table_name, isbn)
    }

    async fn isbn_claim_holder(&self, isbn: i64) -> LibraryResult<Option<i64>> {
        let out = self.client
            .get_item()
            .table_name(self.sequence_table_name.as_str())
            .key("sequence_name", AttributeValue::S(self.isbn_claim_key(isbn)))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(|item| parse_number_attribute("book_id", item)))
    }

    async fn scan_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .scan()
                .table_name(self.table_name.as_str())
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;
            let next_key = out.last_evaluated_key().cloned();
            records.extend(out.items.unwrap_or_default().iter().map(map_to_book));
            match next_key {
                Some(key) => exclusive_start_key = Some(key),
                None => return Ok(records),
            }
        }
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query_index(&self, index_name: &str, attribute: &str,
                         value: AttributeValue) -> LibraryResult<Vec<BookEntity>> {
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .query()
                .table_name(self.table_name.as_str())
                .index_name(index_name)
                .consistent_read(false)
                .key_condition_expression(format!("{} = :{}", attribute, attribute))
                .expression_attribute_values(format!(":{}", attribute), value.clone())
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;
            let next_key = out.last_evaluated_key().cloned();
            records.extend(out.items.unwrap_or_default().iter().map(map_to_book));
            match next_key {
                Some(key) => exclusive_start_key = Some(key),
                None => return Ok(records),
            }
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let stored = self.new_record(entity).await?;
        let val = serde_json::to_value(&stored)?;
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await
            .map_err(|err| {
                if is_conditional_put_failure(&err) {
                    LibraryError::duplicate_key(format!("book {} already exists", stored.book_id).as_str())
                } else {
                    LibraryError::from(err)
                }
            })?;
        Ok(stored)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let now = Utc::now().naive_utc();
        let res = self.client
            .update_item()
            .table_name(self.table_name.as_str())
            .key("book_id", number(entity.book_id))
            .update_expression("SET version = :version, isbn = :isbn, title = :title, author = :author, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number(entity.version))
            .expression_attribute_values(":version", number(entity.version + 1))
            .expression_attribute_values(":isbn", number(entity.isbn))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(book_id) AND version = :old_version")
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match res {
            Ok(out) => {
                out.attributes().map(map_to_book).ok_or_else(|| LibraryError::database(
                    format!("update of book {} returned no attributes", entity.book_id).as_str(), None, false))
            }
            Err(err) if is_conditional_update_failure(&err) => {
                // tell a deleted row from a concurrent modification
                let current = self.get(entity.book_id).await?;
                Err(LibraryError::conflict(
                    format!("book {} was modified, expected version {} but found {}",
                            entity.book_id, entity.version, current.version).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.client
            .query()
            .table_name(self.table_name.as_str())
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "book_id = :book_id",
            )
            .expression_attribute_values(
                ":book_id",
                number(id),
            )
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(LibraryError::database(format!("too many books for {}", id).as_str(), None, false));
                } else if let Some(map) = items.first() {
                    return Ok(map_to_book(map));
                }
            }
            Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: i64) -> LibraryResult<()> {
        self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key("book_id", number(id))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_conditional_delete_failure(&err) {
                    LibraryError::not_found(format!("book not found for {}", id).as_str())
                } else {
                    LibraryError::from(err)
                }
            })
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan_all().await
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    // The book put and the isbn claim commit in one transaction. A claim left by a deleted
    // book, or by one updated to another isbn, is taken over only once its holder no longer
    // carries the isbn.
    async fn create_unique_isbn(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let duplicate = || LibraryError::duplicate_key(format!("isbn {} already stored", entity.isbn).as_str());
        let holder = self.isbn_claim_holder(entity.isbn).await?;
        if holder.is_none() && self.find_by_isbn(entity.isbn).await?.is_some() {
            return Err(duplicate());
        }

        let stored = self.new_record(entity).await?;
        let claim = Put::builder()
            .table_name(self.sequence_table_name.as_str())
            .item("sequence_name", AttributeValue::S(self.isbn_claim_key(entity.isbn)))
            .item("book_id", number(stored.book_id));
        let claim = match holder {
            Some(holder) => claim
                .condition_expression("book_id = :holder")
                .expression_attribute_values(":holder", number(holder)),
            None => claim.condition_expression("attribute_not_exists(sequence_name)"),
        };
        let book = Put::builder()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(serde_json::to_value(&stored)?)?))
            .condition_expression("attribute_not_exists(book_id)");

        let mut request = self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(claim.build()).build())
            .transact_items(TransactWriteItem::builder().put(book.build()).build());
        if let Some(holder) = holder {
            let released = ConditionCheck::builder()
                .table_name(self.table_name.as_str())
                .key("book_id", number(holder))
                .condition_expression("attribute_not_exists(book_id) OR isbn <> :isbn")
                .expression_attribute_values(":isbn", number(entity.isbn))
                .build();
            request = request.transact_items(TransactWriteItem::builder().condition_check(released).build());
        }
        request.send().await.map_err(|err| {
            if is_transaction_canceled(&err) {
                duplicate()
            } else {
                LibraryError::from(err)
            }
        })?;
        Ok(stored)
    }

    async fn find_by_isbn(&self, isbn: i64) -> LibraryResult<Option<BookEntity>> {
        let index_name = Self::isbn_index(self.table_name.as_str());
        let books = self.query_index(index_name.as_str(), "isbn", number(isbn)).await?;
        Ok(books.into_iter().min_by_key(|b| b.book_id))
    }

    async fn find_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        let index_name = Self::author_index(self.table_name.as_str());
        self.query_index(index_name.as_str(), "author", AttributeValue::S(author.to_string())).await
    }

    // DynamoDB only orders within a partition, so the whole table is sorted here.
    async fn find_all_order_by_isbn_desc(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books = self.scan_all().await?;
        sort_by_isbn_desc(&mut books);
        Ok(books)
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        isbn: parse_number_attribute("isbn", map),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
