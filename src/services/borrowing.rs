//! Circulation service: self-service borrow and admin return
//!
//! A book is available iff it has no open borrowing record. Both
//! transitions are committed by the repository as a single unit.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrowing::{BorrowRequest, BorrowingRecord, BorrowingRecordWithBook, NewBorrowingRecord},
        user::Caller,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingService {
    repository: Repository,
}

impl BorrowingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book by code; open to anonymous callers
    pub async fn borrow(&self, request: &BorrowRequest) -> AppResult<BorrowingRecord> {
        request.validate()?;

        let book = self
            .repository
            .books
            .find_by_code(&request.book_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Book code not found".to_string()))?;

        if !book.is_available {
            return Err(AppError::InvalidState("Book is currently borrowed".to_string()));
        }

        let new_record = NewBorrowingRecord {
            book_id: book.id,
            book_code: book.book_code.clone(),
            student_name: request.student_name.clone(),
            roll_number: request.roll_number.clone(),
            email: request.email.clone(),
        };

        // Lost a race with a concurrent borrower between the read and the write
        let record = self
            .repository
            .borrowing
            .open(&new_record)
            .await?
            .ok_or_else(|| AppError::InvalidState("Book is currently borrowed".to_string()))?;

        tracing::info!(
            record_id = record.id,
            book_code = %record.book_code,
            roll_number = %record.roll_number,
            "Book borrowed"
        );
        Ok(record)
    }

    /// Close an open record and make its book available again
    pub async fn return_book(&self, caller: &Caller, record_id: i32) -> AppResult<BorrowingRecord> {
        caller.require_admin()?;

        let record = self
            .repository
            .borrowing
            .close(record_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Borrowing record not found or already returned".to_string())
            })?;

        tracing::info!(record_id = record.id, book_code = %record.book_code, "Book returned");
        Ok(record)
    }

    /// Full borrowing history, newest first
    pub async fn list(&self, caller: &Caller) -> AppResult<Vec<BorrowingRecordWithBook>> {
        caller.require_admin()?;
        self.repository.borrowing.list_with_books().await
    }

    /// History of one book code, open and closed records alike
    pub async fn get_by_book_code(&self, book_code: &str) -> AppResult<Vec<BorrowingRecordWithBook>> {
        self.repository.borrowing.list_by_book_code(book_code).await
    }
}
