//! Repository layer: persistence ports and their adapters
//!
//! Services only talk to the traits below. `Repository::postgres` wires the
//! sqlx adapters, `Repository::in_memory` wires a process-local store.

pub mod articles;
pub mod books;
pub mod borrowing;
pub mod issues;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        article::{Article, NewArticle, UpdateArticle},
        book::{Book, CreateBook, UpdateBook},
        borrowing::{BorrowingRecord, BorrowingRecordWithBook, NewBorrowingRecord},
        issue::{Issue, IssueChanges, IssueWithArticles, NewIssue},
        user::{UpsertUser, User},
    },
};

/// Book persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// All books in creation order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn find_by_code(&self, book_code: &str) -> AppResult<Option<Book>>;

    /// Insert an available book
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book>;

    /// Delete a book that has no open record; closed records are detached
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Borrowing record persistence. Opening and closing a record also flips
/// the book's availability, both writes committed as one unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowingRepository: Send + Sync {
    /// All records with their book, newest borrow first
    async fn list_with_books(&self) -> AppResult<Vec<BorrowingRecordWithBook>>;

    /// Records whose book code snapshot matches, newest borrow first
    async fn list_by_book_code(&self, book_code: &str) -> AppResult<Vec<BorrowingRecordWithBook>>;

    /// Mark the book borrowed and insert an open record.
    /// Returns `None` if the book is no longer available.
    async fn open(&self, record: &NewBorrowingRecord) -> AppResult<Option<BorrowingRecord>>;

    /// Close an open record and mark its book available.
    /// Returns `None` if the record does not exist or is already closed.
    async fn close(&self, record_id: i32) -> AppResult<Option<BorrowingRecord>>;
}

/// Lit Weekly issue persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssuesRepository: Send + Sync {
    /// Issues with articles, newest publish date first
    async fn list(&self, published_only: bool) -> AppResult<Vec<IssueWithArticles>>;

    async fn get_by_id(&self, id: i32) -> AppResult<IssueWithArticles>;

    /// Insert a draft issue together with its articles
    async fn create(&self, issue: &NewIssue, articles: &[NewArticle]) -> AppResult<Issue>;

    async fn update(&self, id: i32, changes: &IssueChanges) -> AppResult<Issue>;

    /// Delete the issue and every article it owns
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Article persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Article>;

    /// Articles of an issue ordered by position
    async fn list_by_issue(&self, issue_id: i32) -> AppResult<Vec<Article>>;

    async fn count_by_issue(&self, issue_id: i32) -> AppResult<i64>;

    async fn create(&self, issue_id: i32, article: &NewArticle) -> AppResult<Article>;

    async fn update(&self, id: i32, data: &UpdateArticle) -> AppResult<Article>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert or refresh a user, bumping `last_signed_in`
    async fn upsert(&self, user: &UpsertUser) -> AppResult<User>;
}

/// Main repository struct holding every persistence port
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub books: Arc<dyn BooksRepository>,
    pub borrowing: Arc<dyn BorrowingRepository>,
    pub issues: Arc<dyn IssuesRepository>,
    pub articles: Arc<dyn ArticlesRepository>,
    pub users: Arc<dyn UsersRepository>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            borrowing: Arc::new(borrowing::PgBorrowingRepository::new(pool.clone())),
            issues: Arc::new(issues::PgIssuesRepository::new(pool.clone())),
            articles: Arc::new(articles::PgArticlesRepository::new(pool.clone())),
            users: Arc::new(users::PgUsersRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::new();
        Self {
            pool: None,
            books: Arc::new(store.clone()),
            borrowing: Arc::new(store.clone()),
            issues: Arc::new(store.clone()),
            articles: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }

    /// Assemble a repository from individual ports
    pub fn from_ports(
        books: Arc<dyn BooksRepository>,
        borrowing: Arc<dyn BorrowingRepository>,
        issues: Arc<dyn IssuesRepository>,
        articles: Arc<dyn ArticlesRepository>,
        users: Arc<dyn UsersRepository>,
    ) -> Self {
        Self {
            pool: None,
            books,
            borrowing,
            issues,
            articles,
            users,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
