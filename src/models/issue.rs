//! Lit Weekly issue model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::article::{Article, CreateIssueArticle};
use crate::error::{AppError, AppResult};

/// Magazine issue; created as a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Issue {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub issue_number: i32,
    pub publish_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Issue with its articles, ordered by `order`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueWithArticles {
    #[serde(flatten)]
    pub issue: Issue,
    pub articles: Vec<Article>,
}

/// Create issue request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateIssue {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub issue_number: i32,
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub publish_date: String,
    #[validate(nested)]
    #[serde(default)]
    pub articles: Vec<CreateIssueArticle>,
}

/// Update issue request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateIssue {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    /// Absent keeps the description, `null` clears it
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub publish_date: Option<String>,
    pub is_published: Option<bool>,
}

/// Wraps any present value, `null` included, in `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Issue row values after validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub issue_number: i32,
    pub publish_date: DateTime<Utc>,
}

/// Column changes for an issue update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub publish_date: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
}

impl IssueChanges {
    pub fn published(is_published: bool) -> Self {
        Self {
            is_published: Some(is_published),
            ..Default::default()
        }
    }
}

/// Parse a publish date given either as RFC 3339 or as a plain date (midnight UTC)
pub fn parse_publish_date(value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::Validation(format!("publish_date: '{}' is not a valid date", value)))
}
