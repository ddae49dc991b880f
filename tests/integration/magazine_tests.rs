use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{admin_token, member_token, TestApp};

async fn create_issue(app: &TestApp, number: i32, publish_date: &str) -> i64 {
    let response = app
        .post(
            "/api/v1/issues",
            Some(&admin_token()),
            json!({
                "title": format!("Lit Weekly #{}", number),
                "issue_number": number,
                "publish_date": publish_date,
                "articles": [
                    { "title": "Monsoon", "author": "A. Poet", "category": "poetry", "content": "Rain..." },
                    { "title": "Review", "author": "B. Critic", "category": "review", "content": "A fine book." }
                ]
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_draft_is_hidden_until_published() {
    let app = TestApp::new();
    let id = create_issue(&app, 1, "2026-01-05").await;

    let public = app.get("/api/v1/issues", None).await;
    assert!(public.body.as_array().unwrap().is_empty());

    let all = app.get("/api/v1/issues/all", Some(&admin_token())).await;
    assert_eq!(all.body.as_array().unwrap().len(), 1);
    assert_eq!(all.body[0]["is_published"], false);

    let response = app
        .send(Method::POST, &format!("/api/v1/issues/{}/publish", id), Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let public = app.get("/api/v1/issues", None).await;
    assert_eq!(public.body.as_array().unwrap().len(), 1);
    assert_eq!(public.body[0]["articles"].as_array().unwrap().len(), 2);

    app.send(Method::POST, &format!("/api/v1/issues/{}/unpublish", id), Some(&admin_token()), None)
        .await;
    let public = app.get("/api/v1/issues", None).await;
    assert!(public.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_published_issues_newest_first() {
    let app = TestApp::new();
    let older = create_issue(&app, 1, "2026-01-05").await;
    let newer = create_issue(&app, 2, "2026-01-12T09:00:00Z").await;
    for id in [older, newer] {
        app.send(Method::POST, &format!("/api/v1/issues/{}/publish", id), Some(&admin_token()), None)
            .await;
    }

    let public = app.get("/api/v1/issues", None).await;
    assert_eq!(public.body[0]["id"].as_i64().unwrap(), newer);
    assert_eq!(public.body[1]["id"].as_i64().unwrap(), older);
}

#[tokio::test]
async fn test_issue_admin_routes_are_gated() {
    let app = TestApp::new();
    let id = create_issue(&app, 1, "2026-01-05").await;

    let response = app.get("/api/v1/issues/all", Some(&member_token())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .send(Method::DELETE, &format!("/api/v1/issues/{}", id), Some(&member_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get(&format!("/api/v1/issues/{}", id), None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_publish_date_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/v1/issues",
            Some(&admin_token()),
            json!({ "title": "Lit Weekly #9", "issue_number": 9, "publish_date": "next tuesday" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let all = app.get("/api/v1/issues/all", Some(&admin_token())).await;
    assert!(all.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_article_lifecycle() {
    let app = TestApp::new();
    let issue_id = create_issue(&app, 1, "2026-01-05").await;

    let response = app
        .post(
            "/api/v1/articles",
            Some(&admin_token()),
            json!({
                "issue_id": issue_id,
                "title": "Letters",
                "author": "C. Reader",
                "category": "letters",
                "content": "Dear editor"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let article_id = response.body["id"].as_i64().unwrap();

    let article = app.get(&format!("/api/v1/articles/{}", article_id), None).await;
    assert_eq!(article.body["order"], 2);

    let articles = app.get(&format!("/api/v1/issues/{}/articles", issue_id), None).await;
    let titles: Vec<&str> = articles
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Monsoon", "Review", "Letters"]);

    let response = app
        .send(
            Method::PUT,
            &format!("/api/v1/articles/{}", article_id),
            Some(&admin_token()),
            Some(json!({ "order": 0 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .send(Method::DELETE, &format!("/api/v1/articles/{}", article_id), Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&format!("/api/v1/articles/{}", article_id), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_article_for_missing_issue_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/v1/articles",
            Some(&admin_token()),
            json!({ "issue_id": 999, "title": "Orphan", "author": "X", "category": "misc", "content": "..." }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_issue_removes_articles() {
    let app = TestApp::new();
    let issue_id = create_issue(&app, 1, "2026-01-05").await;
    let articles = app.get(&format!("/api/v1/issues/{}/articles", issue_id), None).await;
    let article_id = articles.body[0]["id"].as_i64().unwrap();

    let response = app
        .send(Method::DELETE, &format!("/api/v1/issues/{}", issue_id), Some(&admin_token()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&format!("/api/v1/issues/{}", issue_id), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.get(&format!("/api/v1/articles/{}", article_id), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_description_can_be_cleared() {
    let app = TestApp::new();
    let id = create_issue(&app, 1, "2026-01-05").await;
    let uri = format!("/api/v1/issues/{}", id);

    let response = app
        .send(Method::PUT, &uri, Some(&admin_token()), Some(json!({ "description": "Monsoon special" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Absent field keeps the value
    app.send(Method::PUT, &uri, Some(&admin_token()), Some(json!({ "title": "Renamed" })))
        .await;
    let issue = app.get(&uri, None).await;
    assert_eq!(issue.body["description"], "Monsoon special");

    app.send(Method::PUT, &uri, Some(&admin_token()), Some(json!({ "description": null })))
        .await;
    let issue = app.get(&uri, None).await;
    assert_eq!(issue.body["description"], serde_json::Value::Null);
    assert_eq!(issue.body["title"], "Renamed");
}
