use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;

use crate::common::{admin_token, member_token, TestApp, OWNER};

#[tokio::test]
async fn test_me_is_null_without_session() {
    let app = TestApp::new();

    let response = app.get("/api/v1/auth/me", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::Null);
}

#[tokio::test]
async fn test_me_provisions_users() {
    let app = TestApp::new();

    let member = app.get("/api/v1/auth/me", Some(&member_token())).await;
    assert_eq!(member.body["open_id"], "member-open-id");
    assert_eq!(member.body["role"], "user");
    assert_eq!(member.body["name"], "Test User");

    let owner = app.get("/api/v1/auth/me", Some(&admin_token())).await;
    assert_eq!(owner.body["open_id"], OWNER);
    assert_eq!(owner.body["role"], "admin");

    // Second sign-in reuses the same row
    let again = app.get("/api/v1/auth/me", Some(&member_token())).await;
    assert_eq!(again.body["id"], member.body["id"]);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();

    let response = app
        .send(Method::POST, "/api/v1/auth/logout", Some(&member_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let cookie = response.set_cookie.expect("Set-Cookie header");
    assert!(cookie.starts_with("app_session_id="));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    // Plain HTTP: SameSite=None would be dropped without Secure
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_logout_behind_https_proxy_sets_secure_cookie() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/logout")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let cookie = app.request(request).await.set_cookie.expect("Set-Cookie header");
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=None"));
}

#[tokio::test]
async fn test_logout_with_secure_cookies_configured() {
    let app = TestApp::with_auth(|auth| auth.secure_cookies = true);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/logout")
        .header(header::COOKIE, format!("app_session_id={}", member_token()))
        .body(Body::empty())
        .unwrap();
    let response = app.request(request).await;
    assert_eq!(response.status, StatusCode::OK);

    let cookie = response.set_cookie.expect("Set-Cookie header");
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=None"));
    assert!(cookie.contains("Max-Age=0"));
}
