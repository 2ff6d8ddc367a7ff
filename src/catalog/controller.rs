use axum::{
    extract::{Path, State},
    extract::rejection::{JsonRejection, PathRejection},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use crate::books::dto::DataResponse;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::find_books_by_author_cmd::{FindBooksByAuthorCommand, FindBooksByAuthorCommandRequest};
use crate::catalog::command::find_books_ordered_by_isbn_cmd::{FindBooksOrderedByIsbnCommand, FindBooksOrderedByIsbnCommandRequest};
use crate::catalog::command::get_all_books_cmd::{GetAllBooksCommand, GetAllBooksCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/book",
               post(add_book).get(find_all_books).put(update_book))
        .route("/book/by-author", post(find_books_by_author))
        .route("/book/ordered-by-isbn", get(find_books_ordered_by_isbn))
        .route("/book/:id",
               get(find_book_by_id).delete(remove_book))
        .with_state(state)
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<Value> {
    tracing::debug!(environment = state.config.environment.as_str(), "health check");
    Json(json!({"data": "OK"}))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<DataResponse>, ServerError> {
    tracing::debug!("invoking post on /book route");
    let Json(body) = json?;
    let req: AddBookCommandRequest = serde_json::from_value(body)?;
    let res = AddBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_all_books(
    State(state): State<AppState>) -> Result<Json<DataResponse>, ServerError> {
    tracing::debug!("invoking get on /book route");
    let res = GetAllBooksCommand::new(state.catalog_service)
        .execute(GetAllBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>) -> Result<Json<DataResponse>, ServerError> {
    let Path(book_id) = path?;
    tracing::debug!(book_id, "invoking get on /book/:id route");
    let res = GetBookCommand::new(state.catalog_service)
        .execute(GetBookCommandRequest::new(book_id)).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<DataResponse>, ServerError> {
    tracing::debug!("invoking put on /book route");
    let Json(body) = json?;
    let req: UpdateBookCommandRequest = serde_json::from_value(body)?;
    let res = UpdateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>) -> Result<Json<DataResponse>, ServerError> {
    let Path(book_id) = path?;
    tracing::debug!(book_id, "invoking delete on /book/:id route");
    let res = RemoveBookCommand::new(state.catalog_service)
        .execute(RemoveBookCommandRequest::new(book_id)).await?;
    Ok(Json(res))
}

pub(crate) async fn find_books_by_author(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<DataResponse>, ServerError> {
    tracing::debug!("invoking post on /book/by-author route");
    let Json(body) = json?;
    let req: FindBooksByAuthorCommandRequest = serde_json::from_value(body)?;
    let res = FindBooksByAuthorCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_books_ordered_by_isbn(
    State(state): State<AppState>) -> Result<Json<DataResponse>, ServerError> {
    tracing::debug!("invoking get on /book/ordered-by-isbn route");
    let res = FindBooksOrderedByIsbnCommand::new(state.catalog_service)
        .execute(FindBooksOrderedByIsbnCommandRequest::default()).await?;
    Ok(Json(res))
}
