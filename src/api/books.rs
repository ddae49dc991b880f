//! Book catalog API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

use super::{AdminCaller, ApiJson, ApiPath, CreatedResponse, SuccessResponse};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get a book by its human-facing code
#[utoipa::path(
    get,
    path = "/books/code/{book_code}",
    tag = "books",
    params(("book_code" = String, Path, description = "Book code, e.g. LIT-001")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_code(
    State(state): State<crate::AppState>,
    ApiPath(book_code): ApiPath<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_code(&book_code).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("session" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = CreatedResponse),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiJson(data): ApiJson<CreateBook>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let book = state.services.books.create(&caller, &data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: book.id })))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateBook>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.books.update(&caller, id, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is currently borrowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.books.delete(&caller, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
