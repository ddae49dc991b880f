//! Borrowing API endpoints

use axum::{
    extract::State,
    Json,
};

use crate::{
    error::AppResult,
    models::borrowing::{BorrowRequest, BorrowingRecordWithBook},
};

use super::{AdminCaller, ApiJson, ApiPath, MessageResponse};

/// Borrow a book by its code (open to anyone)
#[utoipa::path(
    post,
    path = "/borrowing",
    tag = "borrowing",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "Invalid borrower details", body = crate::error::ErrorResponse),
        (status = 404, description = "Book code not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is currently borrowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<BorrowRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrowing.borrow(&request).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Book borrowed successfully".to_string(),
    }))
}

/// Mark a borrowing record as returned
#[utoipa::path(
    post,
    path = "/borrowing/{id}/return",
    tag = "borrowing",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Borrowing record ID")),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found or already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrowing.return_book(&caller, id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Book returned successfully".to_string(),
    }))
}

/// List every borrowing record, newest first
#[utoipa::path(
    get,
    path = "/borrowing",
    tag = "borrowing",
    security(("session" = [])),
    responses(
        (status = 200, description = "Borrowing records", body = Vec<BorrowingRecordWithBook>),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
) -> AppResult<Json<Vec<BorrowingRecordWithBook>>> {
    let records = state.services.borrowing.list(&caller).await?;
    Ok(Json(records))
}

/// Borrowing history of one book code
#[utoipa::path(
    get,
    path = "/borrowing/book/{book_code}",
    tag = "borrowing",
    params(("book_code" = String, Path, description = "Book code")),
    responses(
        (status = 200, description = "Borrowing records for the book", body = Vec<BorrowingRecordWithBook>)
    )
)]
pub async fn get_records_by_book_code(
    State(state): State<crate::AppState>,
    ApiPath(book_code): ApiPath<String>,
) -> AppResult<Json<Vec<BorrowingRecordWithBook>>> {
    let records = state.services.borrowing.get_by_book_code(&book_code).await?;
    Ok(Json(records))
}
