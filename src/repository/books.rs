//! Books repository for PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_code(&self, book_code: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE book_code = $1")
            .bind(book_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (book_code, title, author, is_available)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(&data.book_code)
        .bind(&data.title)
        .bind(&data.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.book_code, "book_code");
        add_field!(data.title, "title");
        add_field!(data.author, "author");

        let query = format!(
            "UPDATE books SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.book_code);
        bind_field!(data.title);
        bind_field!(data.author);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so a concurrent borrow cannot slip in between the check and the delete
        let available: Option<bool> =
            sqlx::query_scalar("SELECT is_available FROM books WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        match available {
            None => return Err(AppError::NotFound(format!("Book with id {} not found", id))),
            Some(false) => {
                return Err(AppError::InvalidState(
                    "Book is currently borrowed and cannot be deleted".to_string(),
                ))
            }
            Some(true) => {}
        }

        // Closed records keep their book_code snapshot; book_id is set to NULL by the FK
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
