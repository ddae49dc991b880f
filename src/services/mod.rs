//! Business logic services
//!
//! Admin-only operations take the caller explicitly and run the admin gate
//! before any repository access.

pub mod articles;
pub mod auth;
pub mod books;
pub mod borrowing;
pub mod issues;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub borrowing: borrowing::BorrowingService,
    pub issues: issues::IssuesService,
    pub articles: articles::ArticlesService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            books: books::BooksService::new(repository.clone()),
            borrowing: borrowing::BorrowingService::new(repository.clone()),
            issues: issues::IssuesService::new(repository.clone()),
            articles: articles::ArticlesService::new(repository.clone()),
            repository,
        }
    }

    /// Check storage connectivity
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
