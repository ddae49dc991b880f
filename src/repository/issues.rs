//! Lit Weekly issues repository for PostgreSQL

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::IssuesRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        article::{Article, NewArticle},
        issue::{Issue, IssueChanges, IssueWithArticles, NewIssue},
    },
};

#[derive(Clone)]
pub struct PgIssuesRepository {
    pool: Pool<Postgres>,
}

impl PgIssuesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn attach_articles(&self, issues: Vec<Issue>) -> AppResult<Vec<IssueWithArticles>> {
        let ids: Vec<i32> = issues.iter().map(|i| i.id).collect();

        let articles = sqlx::query_as::<_, Article>(
            r#"SELECT * FROM articles WHERE issue_id = ANY($1) ORDER BY "order", id"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_issue: HashMap<i32, Vec<Article>> = HashMap::new();
        for article in articles {
            by_issue.entry(article.issue_id).or_default().push(article);
        }

        Ok(issues
            .into_iter()
            .map(|issue| {
                let articles = by_issue.remove(&issue.id).unwrap_or_default();
                IssueWithArticles { issue, articles }
            })
            .collect())
    }
}

#[async_trait]
impl IssuesRepository for PgIssuesRepository {
    async fn list(&self, published_only: bool) -> AppResult<Vec<IssueWithArticles>> {
        let query = if published_only {
            "SELECT * FROM lit_weekly_issues WHERE is_published = TRUE ORDER BY publish_date DESC, id DESC"
        } else {
            "SELECT * FROM lit_weekly_issues ORDER BY publish_date DESC, id DESC"
        };

        let issues = sqlx::query_as::<_, Issue>(query)
            .fetch_all(&self.pool)
            .await?;

        self.attach_articles(issues).await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<IssueWithArticles> {
        let issue = sqlx::query_as::<_, Issue>("SELECT * FROM lit_weekly_issues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Issue with id {} not found", id)))?;

        let mut issues = self.attach_articles(vec![issue]).await?;
        issues
            .pop()
            .ok_or_else(|| AppError::Internal("issue vanished while loading articles".to_string()))
    }

    async fn create(&self, issue: &NewIssue, articles: &[NewArticle]) -> AppResult<Issue> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Issue>(
            r#"
            INSERT INTO lit_weekly_issues (title, description, issue_number, publish_date, is_published)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(&issue.title)
        .bind(&issue.description)
        .bind(issue.issue_number)
        .bind(issue.publish_date)
        .fetch_one(&mut *tx)
        .await?;

        for article in articles {
            sqlx::query(
                r#"
                INSERT INTO articles (issue_id, title, author, category, content, "order")
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(created.id)
            .bind(&article.title)
            .bind(&article.author)
            .bind(&article.category)
            .bind(&article.content)
            .bind(article.order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &IssueChanges) -> AppResult<Issue> {
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

        add_field!(changes.title, "title");
        add_field!(changes.description, "description");
        add_field!(changes.publish_date, "publish_date");
        add_field!(changes.is_published, "is_published");

        let query = format!(
            "UPDATE lit_weekly_issues SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Issue>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(changes.title);
        bind_field!(changes.description);
        bind_field!(changes.publish_date);
        bind_field!(changes.is_published);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Issue with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM articles WHERE issue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM lit_weekly_issues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Issue with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
