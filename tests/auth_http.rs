//! Integration tests for the session endpoints.

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::{body_json, register, send, send_request, test_app};

#[tokio::test]
async fn register_sets_a_session_cookie() {
    let (app, _pool) = test_app().await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "correct horse battery",
            "display_name": "Ada",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["total_xp"], 0);
    assert_eq!(body["user"]["level"], 1);
    assert_eq!(body["user"]["is_admin"], false);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (app, _pool) = test_app().await;
    register(&app, "ada@example.com", "Ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "another password!",
            "display_name": "Imposter",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "short",
            "display_name": "Ada",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
}

#[tokio::test]
async fn login_roundtrip_works_with_case_insensitive_email() {
    let (app, _pool) = test_app().await;
    register(&app, "ada@example.com", "Ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({
            "email": "  ADA@example.com ",
            "password": "correct horse battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["display_name"], "Ada");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let (app, _pool) = test_app().await;
    register(&app, "ada@example.com", "Ada").await;

    let (status_a, body_a) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "wrong password!!"})),
    )
    .await;
    let (status_b, body_b) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "wrong password!!"})),
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["code"], body_b["code"]);
    assert_eq!(body_a["message"], body_b["message"]);
}

#[tokio::test]
async fn me_requires_a_session() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn me_returns_the_account_for_a_bearer_token() {
    let (app, _pool) = test_app().await;
    let token = register(&app, "ada@example.com", "Ada").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn me_accepts_the_session_cookie() {
    let (app, _pool) = test_app().await;
    let token = register(&app, "ada@example.com", "Ada").await;

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("theme=dark; token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn garbage_token_is_rejected_outright() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/auth/me",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid session token");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let (app, _pool) = test_app().await;

    let response = send_request(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn unknown_api_route_returns_json_404() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
