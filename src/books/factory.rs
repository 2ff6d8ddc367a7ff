use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table, TableIndex};

pub(crate) async fn create_book_repository(config: &Configuration) -> Box<dyn BookRepository> {
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Box::new(DDBBookRepository::new(client, config.table_name.as_str(), config.sequence_table_name.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            if let Err(err) = create_tables(&client, config).await {
                // already created by an earlier run
                tracing::debug!(%err, "skipped creating book tables");
            }
            Box::new(DDBBookRepository::new(client, config.table_name.as_str(), config.sequence_table_name.as_str()))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new())
        }
    }
}

pub(crate) async fn create_tables(client: &Client, config: &Configuration) -> LibraryResult<()> {
    let table_name = config.table_name.as_str();
    let indexes = [
        TableIndex::new(DDBBookRepository::author_index(table_name).as_str(), "author", ScalarAttributeType::S)
            .with_range("isbn", ScalarAttributeType::N),
        TableIndex::new(DDBBookRepository::isbn_index(table_name).as_str(), "isbn", ScalarAttributeType::N),
    ];
    let books = create_table(client, table_name, "book_id", ScalarAttributeType::N, &indexes).await;
    let sequences = create_table(client, config.sequence_table_name.as_str(), "sequence_name", ScalarAttributeType::S, &[]).await;
    books.and(sequences)
}
