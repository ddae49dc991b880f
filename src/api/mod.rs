//! API handlers for the Lit Club REST endpoints

pub mod articles;
pub mod auth;
pub mod books;
pub mod borrowing;
pub mod health;
pub mod issues;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{get, post, put},
    Router,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::user::Caller,
    services::auth::SESSION_COOKIE_NAME,
    AppState,
};

/// Extractor for the caller behind the session cookie or bearer token.
/// Never rejects: requests without a valid session are anonymous.
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(SESSION_COOKIE_NAME) {
            Some(cookie) => Some(cookie.value().to_string()),
            None => TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .ok()
                .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string()),
        };

        let caller = state.services.auth.resolve_session(token.as_deref()).await?;
        Ok(CurrentCaller(caller))
    }
}

/// Extractor for admin-only routes. Listed before path and body extractors
/// so non-admin callers are refused before their input is parsed.
pub struct AdminCaller(pub Caller);

#[async_trait]
impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentCaller(caller) = CurrentCaller::from_request_parts(parts, state).await?;
        caller.require_admin()?;
        Ok(AdminCaller(caller))
    }
}

/// JSON body extractor reporting malformed payloads as validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor reporting unparsable segments as validation errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Identifier of a created row
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Acknowledgement with a human-readable message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/code/:book_code", get(books::get_book_by_code))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        // Borrowing
        .route("/borrowing", get(borrowing::list_records).post(borrowing::borrow_book))
        .route("/borrowing/:id/return", post(borrowing::return_book))
        .route("/borrowing/book/:book_code", get(borrowing::get_records_by_book_code))
        // Lit Weekly issues
        .route("/issues", get(issues::list_issues).post(issues::create_issue))
        .route("/issues/all", get(issues::list_all_issues))
        .route(
            "/issues/:id",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .route("/issues/:id/publish", post(issues::publish_issue))
        .route("/issues/:id/unpublish", post(issues::unpublish_issue))
        .route("/issues/:id/articles", get(articles::list_issue_articles))
        // Articles
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/:id",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
