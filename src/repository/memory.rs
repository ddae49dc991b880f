//! In-memory store implementing every repository port
//!
//! A single mutex guards all tables, so multi-row writes (borrow, return,
//! cascade delete) are applied as one unit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{ArticlesRepository, BooksRepository, BorrowingRepository, IssuesRepository, UsersRepository};
use crate::{
    error::{AppError, AppResult},
    models::{
        article::{Article, NewArticle, UpdateArticle},
        book::{Book, CreateBook, UpdateBook},
        borrowing::{BorrowingRecord, BorrowingRecordWithBook, NewBorrowingRecord},
        issue::{Issue, IssueChanges, IssueWithArticles, NewIssue},
        user::{Role, UpsertUser, User},
    },
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    books: Vec<Book>,
    records: Vec<BorrowingRecord>,
    issues: Vec<Issue>,
    articles: Vec<Article>,
    users: Vec<User>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn articles_of(&self, issue_id: i32) -> Vec<Article> {
        let mut articles: Vec<Article> = self
            .articles
            .iter()
            .filter(|a| a.issue_id == issue_id)
            .cloned()
            .collect();
        articles.sort_by_key(|a| (a.order, a.id));
        articles
    }

    fn with_book(&self, record: &BorrowingRecord) -> BorrowingRecordWithBook {
        let book = record
            .book_id
            .and_then(|id| self.books.iter().find(|b| b.id == id).cloned());
        BorrowingRecordWithBook {
            record: record.clone(),
            book,
        }
    }

    fn insert_article(&mut self, issue_id: i32, article: &NewArticle) -> Article {
        let now = Utc::now();
        let created = Article {
            id: self.next_id(),
            issue_id,
            title: article.title.clone(),
            author: article.author.clone(),
            category: article.category.clone(),
            content: article.content.clone(),
            order: article.order,
            created_at: now,
            updated_at: now,
        };
        self.articles.push(created.clone());
        created
    }
}

/// Process-local store; clones share the same tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_violation(what: &str) -> AppError {
    AppError::Storage(format!("unique constraint violated: {}", what))
}

/// Newest borrow first; ids break ties between records created in the same instant
fn newest_first(records: &mut [BorrowingRecordWithBook]) {
    records.sort_by(|a, b| {
        b.record
            .borrow_date
            .cmp(&a.record.borrow_date)
            .then(b.record.id.cmp(&a.record.id))
    });
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.lock().await;
        Ok(tables.books.clone())
    }

    async fn find_by_code(&self, book_code: &str) -> AppResult<Option<Book>> {
        let tables = self.tables.lock().await;
        Ok(tables.books.iter().find(|b| b.book_code == book_code).cloned())
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tables = self.tables.lock().await;
        if tables.books.iter().any(|b| b.book_code == data.book_code) {
            return Err(unique_violation("books.book_code"));
        }
        let now = Utc::now();
        let book = Book {
            id: tables.next_id(),
            book_code: data.book_code.clone(),
            title: data.title.clone(),
            author: data.author.clone(),
            is_available: true,
            created_at: now,
            updated_at: now,
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut tables = self.tables.lock().await;
        if let Some(code) = &data.book_code {
            if tables.books.iter().any(|b| b.id != id && &b.book_code == code) {
                return Err(unique_violation("books.book_code"));
            }
        }
        let book = tables
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(code) = &data.book_code {
            book.book_code = code.clone();
        }
        if let Some(title) = &data.title {
            book.title = title.clone();
        }
        if let Some(author) = &data.author {
            book.author = author.clone();
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        let book = tables
            .books
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if !book.is_available {
            return Err(AppError::InvalidState(
                "Book is currently borrowed and cannot be deleted".to_string(),
            ));
        }

        tables.books.retain(|b| b.id != id);
        for record in tables.records.iter_mut().filter(|r| r.book_id == Some(id)) {
            record.book_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl BorrowingRepository for MemoryStore {
    async fn list_with_books(&self) -> AppResult<Vec<BorrowingRecordWithBook>> {
        let tables = self.tables.lock().await;
        let mut records: Vec<_> = tables.records.iter().map(|r| tables.with_book(r)).collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn list_by_book_code(&self, book_code: &str) -> AppResult<Vec<BorrowingRecordWithBook>> {
        let tables = self.tables.lock().await;
        let mut records: Vec<_> = tables
            .records
            .iter()
            .filter(|r| r.book_code == book_code)
            .map(|r| tables.with_book(r))
            .collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn open(&self, record: &NewBorrowingRecord) -> AppResult<Option<BorrowingRecord>> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let Some(book) = tables
            .books
            .iter_mut()
            .find(|b| b.id == record.book_id && b.is_available)
        else {
            return Ok(None);
        };
        book.is_available = false;
        book.updated_at = now;

        let created = BorrowingRecord {
            id: tables.next_id(),
            book_id: Some(record.book_id),
            book_code: record.book_code.clone(),
            student_name: record.student_name.clone(),
            roll_number: record.roll_number.clone(),
            email: record.email.clone(),
            borrow_date: now,
            return_date: None,
            is_returned: false,
        };
        tables.records.push(created.clone());
        Ok(Some(created))
    }

    async fn close(&self, record_id: i32) -> AppResult<Option<BorrowingRecord>> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let Some(record) = tables
            .records
            .iter_mut()
            .find(|r| r.id == record_id && !r.is_returned)
        else {
            return Ok(None);
        };
        record.is_returned = true;
        record.return_date = Some(now);
        let closed = record.clone();

        if let Some(book) = closed
            .book_id
            .and_then(|id| tables.books.iter_mut().find(|b| b.id == id))
        {
            book.is_available = true;
            book.updated_at = now;
        }
        Ok(Some(closed))
    }
}

#[async_trait]
impl IssuesRepository for MemoryStore {
    async fn list(&self, published_only: bool) -> AppResult<Vec<IssueWithArticles>> {
        let tables = self.tables.lock().await;
        let mut issues: Vec<Issue> = tables
            .issues
            .iter()
            .filter(|i| !published_only || i.is_published)
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.publish_date.cmp(&a.publish_date).then(b.id.cmp(&a.id)));

        Ok(issues
            .into_iter()
            .map(|issue| {
                let articles = tables.articles_of(issue.id);
                IssueWithArticles { issue, articles }
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<IssueWithArticles> {
        let tables = self.tables.lock().await;
        let issue = tables
            .issues
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Issue with id {} not found", id)))?;
        let articles = tables.articles_of(id);
        Ok(IssueWithArticles { issue, articles })
    }

    async fn create(&self, issue: &NewIssue, articles: &[NewArticle]) -> AppResult<Issue> {
        let mut tables = self.tables.lock().await;
        if tables.issues.iter().any(|i| i.issue_number == issue.issue_number) {
            return Err(unique_violation("lit_weekly_issues.issue_number"));
        }
        let now = Utc::now();
        let created = Issue {
            id: tables.next_id(),
            title: issue.title.clone(),
            description: issue.description.clone(),
            issue_number: issue.issue_number,
            publish_date: issue.publish_date,
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        tables.issues.push(created.clone());
        for article in articles {
            tables.insert_article(created.id, article);
        }
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &IssueChanges) -> AppResult<Issue> {
        let mut tables = self.tables.lock().await;
        let issue = tables
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Issue with id {} not found", id)))?;

        if let Some(title) = &changes.title {
            issue.title = title.clone();
        }
        if let Some(description) = &changes.description {
            issue.description = description.clone();
        }
        if let Some(publish_date) = changes.publish_date {
            issue.publish_date = publish_date;
        }
        if let Some(is_published) = changes.is_published {
            issue.is_published = is_published;
        }
        issue.updated_at = Utc::now();
        Ok(issue.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.issues.iter().any(|i| i.id == id) {
            return Err(AppError::NotFound(format!("Issue with id {} not found", id)));
        }
        tables.articles.retain(|a| a.issue_id != id);
        tables.issues.retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticlesRepository for MemoryStore {
    async fn get_by_id(&self, id: i32) -> AppResult<Article> {
        let tables = self.tables.lock().await;
        tables
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", id)))
    }

    async fn list_by_issue(&self, issue_id: i32) -> AppResult<Vec<Article>> {
        let tables = self.tables.lock().await;
        Ok(tables.articles_of(issue_id))
    }

    async fn count_by_issue(&self, issue_id: i32) -> AppResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.articles.iter().filter(|a| a.issue_id == issue_id).count() as i64)
    }

    async fn create(&self, issue_id: i32, article: &NewArticle) -> AppResult<Article> {
        let mut tables = self.tables.lock().await;
        if !tables.issues.iter().any(|i| i.id == issue_id) {
            return Err(AppError::Storage(format!(
                "foreign key violated: articles.issue_id {}",
                issue_id
            )));
        }
        Ok(tables.insert_article(issue_id, article))
    }

    async fn update(&self, id: i32, data: &UpdateArticle) -> AppResult<Article> {
        let mut tables = self.tables.lock().await;
        let article = tables
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", id)))?;

        if let Some(title) = &data.title {
            article.title = title.clone();
        }
        if let Some(author) = &data.author {
            article.author = author.clone();
        }
        if let Some(category) = &data.category {
            article.category = category.clone();
        }
        if let Some(content) = &data.content {
            article.content = content.clone();
        }
        if let Some(order) = data.order {
            article.order = order;
        }
        article.updated_at = Utc::now();
        Ok(article.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        if tables.articles.len() == before {
            return Err(AppError::NotFound(format!("Article with id {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl UsersRepository for MemoryStore {
    async fn upsert(&self, user: &UpsertUser) -> AppResult<User> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        if let Some(existing) = tables.users.iter_mut().find(|u| u.open_id == user.open_id) {
            if user.name.is_some() {
                existing.name = user.name.clone();
            }
            if user.email.is_some() {
                existing.email = user.email.clone();
            }
            if user.login_method.is_some() {
                existing.login_method = user.login_method.clone();
            }
            if let Some(role) = user.role {
                existing.role = role;
            }
            existing.last_signed_in = now;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = User {
            id: tables.next_id(),
            open_id: user.open_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            login_method: user.login_method.clone(),
            role: user.role.unwrap_or(Role::User),
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}
