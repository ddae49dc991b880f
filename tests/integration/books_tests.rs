use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{admin_token, member_token, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.get("/api/v1/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");

    let response = app.get("/api/v1/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ready");
}

#[tokio::test]
async fn test_create_and_lookup_book() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;

    let response = app.get("/api/v1/books/code/LIT-001", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Gitanjali");
    assert_eq!(response.body["is_available"], true);

    let response = app.get("/api/v1/books", None).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/v1/books/code/NOPE", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let app = TestApp::new();
    let book = json!({ "book_code": "LIT-002", "title": "Godan", "author": "Premchand" });

    let anonymous = app.post("/api/v1/books", None, book.clone()).await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);
    assert_eq!(anonymous.body["error"], "FORBIDDEN");

    let member = app.post("/api/v1/books", Some(&member_token()), book).await;
    assert_eq!(member.status, StatusCode::FORBIDDEN);

    let response = app.get("/api/v1/books", None).await;
    assert!(response.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/v1/books",
            Some("not-a-jwt"),
            json!({ "book_code": "LIT-003", "title": "Malgudi Days", "author": "Narayan" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_and_delete_book() {
    let app = TestApp::new();
    let id = app.seed_book("LIT-004").await;

    let response = app
        .send(
            Method::PUT,
            &format!("/api/v1/books/{}", id),
            Some(&admin_token()),
            Some(json!({ "title": "Gitanjali (Song Offerings)" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let response = app.get("/api/v1/books/code/LIT-004", None).await;
    assert_eq!(response.body["title"], "Gitanjali (Song Offerings)");

    let response = app
        .send(Method::DELETE, &format!("/api/v1/books/{}", id), Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/v1/books/code/LIT-004", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .post("/api/v1/books", Some(&admin_token()), json!({ "book_code": "LIT-005" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unparsable_id_is_json_validation_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/issues/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let response = app
        .send(Method::DELETE, "/api/v1/books/xyz", Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_check_runs_before_input_parsing() {
    let app = TestApp::new();

    let response = app.post("/api/v1/books", None, json!({ "book_code": 5 })).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app.send(Method::DELETE, "/api/v1/books/xyz", None, None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .send(Method::PUT, "/api/v1/issues/abc", Some(&member_token()), Some(json!({ "title": 1 })))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
