use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{admin_token, member_token, TestApp};

fn borrow_body(code: &str) -> Value {
    json!({
        "book_code": code,
        "student_name": "Jane Doe",
        "roll_number": "22CS01",
        "email": "jane@example.com"
    })
}

#[tokio::test]
async fn test_borrow_and_return_round_trip() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;

    let response = app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["message"].is_string());

    let book = app.get("/api/v1/books/code/LIT-001", None).await;
    assert_eq!(book.body["is_available"], false);

    let records = app.get("/api/v1/borrowing/book/LIT-001", None).await;
    let records = records.body.as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["is_returned"], false);
    assert_eq!(records[0]["book"]["book_code"], "LIT-001");
    let record_id = records[0]["id"].as_i64().unwrap();

    let response = app
        .send(
            Method::POST,
            &format!("/api/v1/borrowing/{}/return", record_id),
            Some(&admin_token()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let book = app.get("/api/v1/books/code/LIT-001", None).await;
    assert_eq!(book.body["is_available"], true);

    let records = app.get("/api/v1/borrowing/book/LIT-001", None).await;
    assert_eq!(records.body[0]["is_returned"], true);
    assert!(records.body[0]["return_date"].is_string());
}

#[tokio::test]
async fn test_second_borrow_is_rejected() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;

    let first = app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "INVALID_STATE");
    assert_eq!(second.body["message"], "Book is currently borrowed");

    let records = app.get("/api/v1/borrowing/book/LIT-001", None).await;
    assert_eq!(records.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_borrow_rejects_bad_input() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;

    let mut body = borrow_body("LIT-001");
    body["email"] = json!("not-an-email");
    let response = app.post("/api/v1/borrowing", None, body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app.post("/api/v1/borrowing", None, borrow_body("NOPE")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let book = app.get("/api/v1/books/code/LIT-001", None).await;
    assert_eq!(book.body["is_available"], true);
}

#[tokio::test]
async fn test_return_requires_admin_and_open_record() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;
    app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;
    let records = app.get("/api/v1/borrowing/book/LIT-001", None).await;
    let uri = format!("/api/v1/borrowing/{}/return", records.body[0]["id"].as_i64().unwrap());

    let response = app.send(Method::POST, &uri, Some(&member_token()), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.send(Method::POST, &uri, Some(&admin_token()), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.send(Method::POST, &uri, Some(&admin_token()), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_listing_is_admin_only() {
    let app = TestApp::new();
    app.seed_book("LIT-001").await;
    app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;

    let response = app.get("/api/v1/borrowing", None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/api/v1/borrowing", Some(&admin_token())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_borrowed_book_cannot_be_deleted() {
    let app = TestApp::new();
    let id = app.seed_book("LIT-001").await;
    app.post("/api/v1/borrowing", None, borrow_body("LIT-001")).await;

    let response = app
        .send(Method::DELETE, &format!("/api/v1/books/{}", id), Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}
