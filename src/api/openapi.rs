//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{articles, auth, books, borrowing, health, issues};
use crate::services::auth::SESSION_COOKIE_NAME;

/// Registers the session cookie as the security scheme used by admin routes
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lit Club API",
        version = "1.0.0",
        description = "Literary club REST API: book lending and the Lit Weekly magazine",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SessionCookieAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Session
        auth::me,
        auth::logout,
        // Books
        books::list_books,
        books::get_book_by_code,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowing
        borrowing::borrow_book,
        borrowing::return_book,
        borrowing::list_records,
        borrowing::get_records_by_book_code,
        // Issues
        issues::list_issues,
        issues::list_all_issues,
        issues::get_issue,
        issues::create_issue,
        issues::update_issue,
        issues::publish_issue,
        issues::unpublish_issue,
        issues::delete_issue,
        // Articles
        articles::get_article,
        articles::list_issue_articles,
        articles::create_article,
        articles::update_article,
        articles::delete_article,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Borrowing
            crate::models::borrowing::BorrowingRecord,
            crate::models::borrowing::BorrowingRecordWithBook,
            crate::models::borrowing::BorrowRequest,
            // Issues
            crate::models::issue::Issue,
            crate::models::issue::IssueWithArticles,
            crate::models::issue::CreateIssue,
            crate::models::issue::UpdateIssue,
            // Articles
            crate::models::article::Article,
            crate::models::article::CreateIssueArticle,
            crate::models::article::CreateArticle,
            crate::models::article::UpdateArticle,
            // Responses
            crate::api::CreatedResponse,
            crate::api::SuccessResponse,
            crate::api::MessageResponse,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "borrowing", description = "Book lending"),
        (name = "issues", description = "Lit Weekly issues"),
        (name = "articles", description = "Lit Weekly articles")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
