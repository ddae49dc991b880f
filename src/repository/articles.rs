//! Articles repository for PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::ArticlesRepository;
use crate::{
    error::{AppError, AppResult},
    models::article::{Article, NewArticle, UpdateArticle},
};

#[derive(Clone)]
pub struct PgArticlesRepository {
    pool: Pool<Postgres>,
}

impl PgArticlesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticlesRepository for PgArticlesRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Article> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", id)))
    }

    async fn list_by_issue(&self, issue_id: i32) -> AppResult<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"SELECT * FROM articles WHERE issue_id = $1 ORDER BY "order", id"#,
        )
        .bind(issue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn count_by_issue(&self, issue_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE issue_id = $1")
            .bind(issue_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(&self, issue_id: i32, article: &NewArticle) -> AppResult<Article> {
        let created = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (issue_id, title, author, category, content, "order")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(issue_id)
        .bind(&article.title)
        .bind(&article.author)
        .bind(&article.category)
        .bind(&article.content)
        .bind(article.order)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, data: &UpdateArticle) -> AppResult<Article> {
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

        add_field!(data.title, "title");
        add_field!(data.author, "author");
        add_field!(data.category, "category");
        add_field!(data.content, "content");
        add_field!(data.order, "\"order\"");

        let query = format!(
            "UPDATE articles SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Article>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.category);
        bind_field!(data.content);
        bind_field!(data.order);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article with id {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article with id {} not found", id)));
        }
        Ok(())
    }
}
