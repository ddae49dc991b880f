//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Physical book available for lending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Shelf code, unique (e.g. "LIT-001")
    pub book_code: String,
    pub title: String,
    pub author: String,
    /// False while an open borrowing record exists
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub book_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
}

/// Update book request; availability is driven by borrowing only
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub book_code: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: Option<String>,
}
