//! Borrowing record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// One loan of a book. Append-only: closed exactly once, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingRecord {
    pub id: i32,
    /// Detached (None) once a book with closed history is deleted
    pub book_id: Option<i32>,
    /// Code of the book at borrow time
    pub book_code: String,
    pub student_name: String,
    pub roll_number: String,
    pub email: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub is_returned: bool,
}

impl BorrowingRecord {
    pub fn is_open(&self) -> bool {
        !self.is_returned
    }
}

/// Borrowing record joined with its book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowingRecordWithBook {
    #[serde(flatten)]
    pub record: BorrowingRecord,
    pub book: Option<Book>,
}

/// Self-service checkout request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BorrowRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub book_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub student_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub roll_number: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Borrower details written into a new record
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowingRecord {
    pub book_id: i32,
    pub book_code: String,
    pub student_name: String,
    pub roll_number: String,
    pub email: String,
}
