//! Shared helpers for the HTTP integration tests.
//!
//! Each test builds a full router over an in-memory SQLite database, so
//! requests exercise the real middleware, handlers, and repositories.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use sensebait::adapters::http::{build_router, AppState};
use sensebait::adapters::sqlite::{schema, SqliteCatalogRepository};
use sensebait::config::{AppConfig, AuthConfig, ContentConfig, DatabaseConfig, ServerConfig};
use sensebait::domain::catalog::QuestionOptions;
use sensebait::ports::{CatalogRepository, ModuleDraft, QuestionDraft, SectionDraft};

pub const CORRECT: &str = "the right answer";
pub const WRONG: &str = "the wrong answer";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        },
        auth: AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            ..Default::default()
        },
        content: ContentConfig::default(),
    }
}

/// Builds the application router over a fresh in-memory database.
pub async fn test_app() -> (Router, SqlitePool) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    // One connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    schema::apply(&pool).await.unwrap();

    let state = AppState::from_pool(Arc::new(test_config()), pool.clone());
    (build_router(state), pool)
}

pub async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Sends a request and returns status plus parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send_request(app, method, uri, token, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Registers an account and returns its session token.
pub async fn register(app: &Router, email: &str, display_name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "correct horse battery",
            "display_name": display_name,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Flips the admin flag directly; there is no self-serve path to admin.
pub async fn make_admin(pool: &SqlitePool, email: &str) {
    sqlx::query("UPDATE users SET is_admin = 1 WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}

/// Seeds one module with one section holding `question_count` questions.
/// Every question accepts `CORRECT` and `WRONG`, with `CORRECT` right.
pub async fn seed_section_with_questions(
    pool: &SqlitePool,
    question_count: usize,
) -> (i64, i64, Vec<i64>) {
    let catalog = SqliteCatalogRepository::new(pool.clone());
    let module = catalog
        .create_module(&ModuleDraft {
            name: "phishing".to_string(),
            display_name: "Phishing".to_string(),
            description: Some("Spotting fraudulent messages".to_string()),
            order_index: 1,
        })
        .await
        .unwrap();
    let section = catalog
        .create_section(&SectionDraft {
            module_id: module.id(),
            name: "email-basics".to_string(),
            display_name: "Email Basics".to_string(),
            description: None,
            order_index: 1,
        })
        .await
        .unwrap();

    let mut question_ids = Vec::with_capacity(question_count);
    for i in 0..question_count {
        let question = catalog
            .create_question(&QuestionDraft {
                section_id: section.id(),
                question_text: format!("Question {}?", i + 1),
                options: QuestionOptions::new(vec![CORRECT.to_string(), WRONG.to_string()])
                    .unwrap(),
                correct_answer: CORRECT.to_string(),
                explanation: "Because of the sender address.".to_string(),
            })
            .await
            .unwrap();
        question_ids.push(question.id().as_i64());
    }

    (module.id().as_i64(), section.id().as_i64(), question_ids)
}

/// Inserts learning content screens for a section, returning their ids.
pub async fn seed_content(pool: &SqlitePool, section_id: i64, screens: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(screens);
    for i in 0..screens {
        let result = sqlx::query(
            "INSERT INTO learning_content \
             (section_id, screen_title, content_markdown, read_time_min, order_index, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(section_id)
        .bind(format!("Screen {}", i + 1))
        .bind("# Heading\n\nBody text.")
        .bind(2_i64)
        .bind((i + 1) as i64)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await
        .unwrap();
        ids.push(result.last_insert_rowid());
    }
    ids
}
