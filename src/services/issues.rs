//! Lit Weekly issue service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        article::NewArticle,
        issue::{
            parse_publish_date, CreateIssue, Issue, IssueChanges, IssueWithArticles, NewIssue,
            UpdateIssue,
        },
        user::Caller,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct IssuesService {
    repository: Repository,
}

impl IssuesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Published issues, newest first
    pub async fn list(&self) -> AppResult<Vec<IssueWithArticles>> {
        self.repository.issues.list(true).await
    }

    /// Every issue including drafts
    pub async fn list_all(&self, caller: &Caller) -> AppResult<Vec<IssueWithArticles>> {
        caller.require_admin()?;
        self.repository.issues.list(false).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<IssueWithArticles> {
        self.repository.issues.get_by_id(id).await
    }

    /// Create a draft issue; nested articles default to their submission position
    pub async fn create(&self, caller: &Caller, data: &CreateIssue) -> AppResult<Issue> {
        caller.require_admin()?;
        data.validate()?;

        let issue = NewIssue {
            title: data.title.clone(),
            description: data.description.clone(),
            issue_number: data.issue_number,
            publish_date: parse_publish_date(&data.publish_date)?,
        };
        let articles: Vec<NewArticle> = data
            .articles
            .iter()
            .enumerate()
            .map(|(position, article)| NewArticle::from_submission(article, position))
            .collect();

        let created = self.repository.issues.create(&issue, &articles).await?;
        tracing::info!(
            issue_id = created.id,
            issue_number = created.issue_number,
            articles = articles.len(),
            "Issue created"
        );
        Ok(created)
    }

    pub async fn update(&self, caller: &Caller, id: i32, data: &UpdateIssue) -> AppResult<Issue> {
        caller.require_admin()?;
        data.validate()?;

        let changes = IssueChanges {
            title: data.title.clone(),
            description: data.description.clone(),
            publish_date: data
                .publish_date
                .as_deref()
                .map(parse_publish_date)
                .transpose()?,
            is_published: data.is_published,
        };
        self.repository.issues.update(id, &changes).await
    }

    pub async fn publish(&self, caller: &Caller, id: i32) -> AppResult<Issue> {
        caller.require_admin()?;
        let issue = self.repository.issues.update(id, &IssueChanges::published(true)).await?;
        tracing::info!(issue_id = id, "Issue published");
        Ok(issue)
    }

    pub async fn unpublish(&self, caller: &Caller, id: i32) -> AppResult<Issue> {
        caller.require_admin()?;
        let issue = self.repository.issues.update(id, &IssueChanges::published(false)).await?;
        tracing::info!(issue_id = id, "Issue unpublished");
        Ok(issue)
    }

    /// Delete an issue together with all of its articles
    pub async fn delete(&self, caller: &Caller, id: i32) -> AppResult<()> {
        caller.require_admin()?;
        self.repository.issues.delete(id).await?;
        tracing::info!(issue_id = id, "Issue deleted");
        Ok(())
    }
}
