//! Article model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Article belonging to exactly one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    pub id: i32,
    pub issue_id: i32,
    pub title: String,
    pub author: String,
    pub category: String,
    pub content: String,
    /// Position within the issue
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article submitted together with a new issue
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateIssueArticle {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    pub order: Option<i32>,
}

/// Create article request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArticle {
    pub issue_id: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    /// Defaults to the end of the issue
    pub order: Option<i32>,
}

/// Update article request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateArticle {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: Option<String>,
    pub order: Option<i32>,
}

/// Article row values with a resolved position
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub author: String,
    pub category: String,
    pub content: String,
    pub order: i32,
}

impl NewArticle {
    /// Resolve an article submitted with its issue; `position` is its index in the submission
    pub fn from_submission(article: &CreateIssueArticle, position: usize) -> Self {
        Self {
            title: article.title.clone(),
            author: article.author.clone(),
            category: article.category.clone(),
            content: article.content.clone(),
            order: article.order.unwrap_or(position as i32),
        }
    }
}
