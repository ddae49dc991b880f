//! Data models for the Lit Club server

pub mod article;
pub mod book;
pub mod borrowing;
pub mod issue;
pub mod user;

// Re-export commonly used types
pub use article::Article;
pub use book::Book;
pub use borrowing::{BorrowingRecord, BorrowingRecordWithBook};
pub use issue::{Issue, IssueWithArticles};
pub use user::{Caller, Role, User};
