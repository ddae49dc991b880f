//! Article service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        article::{Article, CreateArticle, NewArticle, UpdateArticle},
        user::Caller,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ArticlesService {
    repository: Repository,
}

impl ArticlesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Article> {
        self.repository.articles.get_by_id(id).await
    }

    /// Articles of an issue ordered by position
    pub async fn get_by_issue_id(&self, issue_id: i32) -> AppResult<Vec<Article>> {
        self.repository.articles.list_by_issue(issue_id).await
    }

    /// Add an article to an existing issue; without an explicit order it is appended
    pub async fn create(&self, caller: &Caller, data: &CreateArticle) -> AppResult<Article> {
        caller.require_admin()?;
        data.validate()?;

        // Fails with NotFound for an unknown issue
        self.repository.issues.get_by_id(data.issue_id).await?;

        let order = match data.order {
            Some(order) => order,
            None => self.repository.articles.count_by_issue(data.issue_id).await? as i32,
        };
        let article = NewArticle {
            title: data.title.clone(),
            author: data.author.clone(),
            category: data.category.clone(),
            content: data.content.clone(),
            order,
        };

        let created = self.repository.articles.create(data.issue_id, &article).await?;
        tracing::info!(article_id = created.id, issue_id = created.issue_id, "Article created");
        Ok(created)
    }

    pub async fn update(&self, caller: &Caller, id: i32, data: &UpdateArticle) -> AppResult<Article> {
        caller.require_admin()?;
        data.validate()?;
        self.repository.articles.update(id, data).await
    }

    pub async fn delete(&self, caller: &Caller, id: i32) -> AppResult<()> {
        caller.require_admin()?;
        self.repository.articles.delete(id).await
    }
}
