//! Lit Weekly issue API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::issue::{CreateIssue, IssueWithArticles, UpdateIssue},
};

use super::{AdminCaller, ApiJson, ApiPath, CreatedResponse, SuccessResponse};

/// List published issues, newest first
#[utoipa::path(
    get,
    path = "/issues",
    tag = "issues",
    responses(
        (status = 200, description = "Published issues with their articles", body = Vec<IssueWithArticles>)
    )
)]
pub async fn list_issues(State(state): State<crate::AppState>) -> AppResult<Json<Vec<IssueWithArticles>>> {
    let issues = state.services.issues.list().await?;
    Ok(Json(issues))
}

/// List all issues including drafts
#[utoipa::path(
    get,
    path = "/issues/all",
    tag = "issues",
    security(("session" = [])),
    responses(
        (status = 200, description = "All issues with their articles", body = Vec<IssueWithArticles>),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_all_issues(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
) -> AppResult<Json<Vec<IssueWithArticles>>> {
    let issues = state.services.issues.list_all(&caller).await?;
    Ok(Json(issues))
}

/// Get an issue with its articles
#[utoipa::path(
    get,
    path = "/issues/{id}",
    tag = "issues",
    params(("id" = i32, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Issue details", body = IssueWithArticles),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_issue(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<IssueWithArticles>> {
    let issue = state.services.issues.get_by_id(id).await?;
    Ok(Json(issue))
}

/// Create a draft issue, optionally with its articles
#[utoipa::path(
    post,
    path = "/issues",
    tag = "issues",
    security(("session" = [])),
    request_body = CreateIssue,
    responses(
        (status = 201, description = "Issue created", body = CreatedResponse),
        (status = 400, description = "Invalid issue", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_issue(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiJson(data): ApiJson<CreateIssue>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let issue = state.services.issues.create(&caller, &data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: issue.id })))
}

/// Update an issue
#[utoipa::path(
    put,
    path = "/issues/{id}",
    tag = "issues",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Issue ID")),
    request_body = UpdateIssue,
    responses(
        (status = 200, description = "Issue updated", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_issue(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateIssue>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.issues.update(&caller, id, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Publish an issue
#[utoipa::path(
    post,
    path = "/issues/{id}/publish",
    tag = "issues",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Issue published", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn publish_issue(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.issues.publish(&caller, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Move an issue back to draft
#[utoipa::path(
    post,
    path = "/issues/{id}/unpublish",
    tag = "issues",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Issue unpublished", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn unpublish_issue(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.issues.unpublish(&caller, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Delete an issue and all of its articles
#[utoipa::path(
    delete,
    path = "/issues/{id}",
    tag = "issues",
    security(("session" = [])),
    params(("id" = i32, Path, description = "Issue ID")),
    responses(
        (status = 200, description = "Issue deleted", body = SuccessResponse),
        (status = 403, description = "Admin access required", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_issue(
    State(state): State<crate::AppState>,
    AdminCaller(caller): AdminCaller,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.issues.delete(&caller, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
