//! Article API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::article::{Article, CreateArticle, UpdateArticle},
};

use super::{AdminCaller, ApiJson, ApiPath, CreatedResponse, SuccessResponse};

/// Get an article
#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "articles",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article details", body = Article),
        (status = 404, description = "Article not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_article(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Article>> {
    let article = state.services.articles.get_by_id(id).await?;
    Ok(Json(article))
}

/// List the articles of an issue in display order
#[utoipa::path(
    get,
    path = "/issues/{id}/articles",
    tag = "articles",
    params(("id" = i32, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Articles of the issue", body = Vec<Article>)
    )
)]
pub async fn list_issue_articles(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Vec<Article>>> {
    let articles = state.services.articles.get_by_issue_id(id).await?;
    Ok(Json(articles))
}

/// Attach an article to an existing issue
#[utoipa::path(
    post,
    path = "/articles",
    tag = "articles",
    security(("session" = [])),
    request_body = CreateArticle,
    responses(
        (status = 201, description = "Article created", body = CreatedResponse),
        (status = 400, description = "Invalid article", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_article(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiJson(data): ApiJson<CreateArticle>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let article = state.services.articles.create(&caller, &data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: article.id })))
}

/// Update an article
#[utoipa::path(
    put,
    path = "/articles/{id}",
    tag = "articles",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    request_body = UpdateArticle,
    responses(
        (status = 200, description = "Article updated", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Article not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_article(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateArticle>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.articles.update(&caller, id, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/articles/{id}",
    tag = "articles",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Article not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_article(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.articles.delete(&caller, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
