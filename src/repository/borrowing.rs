//! Borrowing records repository for PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};

use super::BorrowingRepository;
use crate::{
    error::AppResult,
    models::{
        book::Book,
        borrowing::{BorrowingRecord, BorrowingRecordWithBook, NewBorrowingRecord},
    },
};

const RECORD_WITH_BOOK_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.book_code, r.student_name, r.roll_number, r.email,
           r.borrow_date, r.return_date, r.is_returned,
           b.id AS b_id, b.book_code AS b_book_code, b.title AS b_title,
           b.author AS b_author, b.is_available AS b_is_available,
           b.created_at AS b_created_at, b.updated_at AS b_updated_at
    FROM borrowing_records r
    LEFT JOIN books b ON b.id = r.book_id
"#;

/// Internal row structure for the record/book join
#[derive(Debug, FromRow)]
struct RecordWithBookRow {
    id: i32,
    book_id: Option<i32>,
    book_code: String,
    student_name: String,
    roll_number: String,
    email: String,
    borrow_date: DateTime<Utc>,
    return_date: Option<DateTime<Utc>>,
    is_returned: bool,
    b_id: Option<i32>,
    b_book_code: Option<String>,
    b_title: Option<String>,
    b_author: Option<String>,
    b_is_available: Option<bool>,
    b_created_at: Option<DateTime<Utc>>,
    b_updated_at: Option<DateTime<Utc>>,
}

impl From<RecordWithBookRow> for BorrowingRecordWithBook {
    fn from(row: RecordWithBookRow) -> Self {
        let book = match (
            row.b_id,
            row.b_book_code,
            row.b_title,
            row.b_author,
            row.b_is_available,
            row.b_created_at,
            row.b_updated_at,
        ) {
            (
                Some(id),
                Some(book_code),
                Some(title),
                Some(author),
                Some(is_available),
                Some(created_at),
                Some(updated_at),
            ) => Some(Book {
                id,
                book_code,
                title,
                author,
                is_available,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        BorrowingRecordWithBook {
            record: BorrowingRecord {
                id: row.id,
                book_id: row.book_id,
                book_code: row.book_code,
                student_name: row.student_name,
                roll_number: row.roll_number,
                email: row.email,
                borrow_date: row.borrow_date,
                return_date: row.return_date,
                is_returned: row.is_returned,
            },
            book,
        }
    }
}

#[derive(Clone)]
pub struct PgBorrowingRepository {
    pool: Pool<Postgres>,
}

impl PgBorrowingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingRepository for PgBorrowingRepository {
    async fn list_with_books(&self) -> AppResult<Vec<BorrowingRecordWithBook>> {
        let query = format!("{} ORDER BY r.borrow_date DESC, r.id DESC", RECORD_WITH_BOOK_SELECT);
        let rows = sqlx::query_as::<_, RecordWithBookRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_book_code(&self, book_code: &str) -> AppResult<Vec<BorrowingRecordWithBook>> {
        let query = format!(
            "{} WHERE r.book_code = $1 ORDER BY r.borrow_date DESC, r.id DESC",
            RECORD_WITH_BOOK_SELECT
        );
        let rows = sqlx::query_as::<_, RecordWithBookRow>(&query)
            .bind(book_code)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn open(&self, record: &NewBorrowingRecord) -> AppResult<Option<BorrowingRecord>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Compare-and-swap on availability: only one concurrent borrower can flip it
        let claimed = sqlx::query(
            "UPDATE books SET is_available = FALSE, updated_at = $1 WHERE id = $2 AND is_available = TRUE",
        )
        .bind(now)
        .bind(record.book_id)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let created = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            INSERT INTO borrowing_records
                (book_id, book_code, student_name, roll_number, email, borrow_date, is_returned)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id, book_id, book_code, student_name, roll_number, email,
                      borrow_date, return_date, is_returned
            "#,
        )
        .bind(record.book_id)
        .bind(&record.book_code)
        .bind(&record.student_name)
        .bind(&record.roll_number)
        .bind(&record.email)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(created))
    }

    async fn close(&self, record_id: i32) -> AppResult<Option<BorrowingRecord>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            UPDATE borrowing_records
            SET is_returned = TRUE, return_date = $1, updated_at = $1
            WHERE id = $2 AND is_returned = FALSE
            RETURNING id, book_id, book_code, student_name, roll_number, email,
                      borrow_date, return_date, is_returned
            "#,
        )
        .bind(now)
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = closed else {
            return Ok(None);
        };

        if let Some(book_id) = record.book_id {
            sqlx::query("UPDATE books SET is_available = TRUE, updated_at = $1 WHERE id = $2")
                .bind(now)
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(record))
    }
}
