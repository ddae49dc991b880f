//! Book catalogue service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        user::Caller,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books in creation order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_code(&self, book_code: &str) -> AppResult<Book> {
        self.repository
            .books
            .find_by_code(book_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn create(&self, caller: &Caller, data: &CreateBook) -> AppResult<Book> {
        caller.require_admin()?;
        data.validate()?;

        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, book_code = %book.book_code, "Book created");
        Ok(book)
    }

    pub async fn update(&self, caller: &Caller, id: i32, data: &UpdateBook) -> AppResult<Book> {
        caller.require_admin()?;
        data.validate()?;
        self.repository.books.update(id, data).await
    }

    /// Refused while the book is borrowed; closed history survives the book
    pub async fn delete(&self, caller: &Caller, id: i32) -> AppResult<()> {
        caller.require_admin()?;
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
