#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pharmacy_api::{database, router, AppState, Config};

/// Fresh application state backed by an isolated in-memory database.
pub async fn test_state() -> AppState {
    let config = Config::for_tests();
    let pool = database::setup_database(&config.database_url, config.max_connections)
        .await
        .expect("failed to open in-memory database");
    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    AppState::new(pool, config)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    let app = router::build_router(state.clone());
    (app, state)
}

/// State backed by a throwaway database file, so several pool connections
/// share the same data as they would in production. Callers should close
/// the pool and pass the returned path to [`remove_database_files`].
pub async fn file_backed_state(max_connections: u32) -> (AppState, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("pharmacy-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::for_tests();
    config.database_url = format!("sqlite://{}", path.display());
    config.max_connections = max_connections;

    let pool = database::setup_database(&config.database_url, config.max_connections)
        .await
        .expect("failed to open file-backed database");
    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    (AppState::new(pool, config), path)
}

pub fn remove_database_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

/// Drive one request through the router and decode the JSON body.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    request_with_token(app, method, uri, body, None).await
}

pub async fn request_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request did not complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };

    (status, json)
}

/// Seed a customer directly, bypassing the API.
pub async fn seed_customer(db: &sqlx::SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO customers (name, created_at) VALUES (?, ?)")
        .bind(name)
        .bind(chrono::Utc::now())
        .execute(db)
        .await
        .expect("failed to seed customer")
        .last_insert_rowid()
}

/// Seed a medication directly, bypassing the API.
pub async fn seed_medication(db: &sqlx::SqlitePool, name: &str, stock: i64, price: f64) -> i64 {
    sqlx::query("INSERT INTO medications (name, stock, price, created_at) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(stock)
        .bind(price)
        .bind(chrono::Utc::now())
        .execute(db)
        .await
        .expect("failed to seed medication")
        .last_insert_rowid()
}

pub async fn medication_stock(db: &sqlx::SqlitePool, id: i64) -> i64 {
    sqlx::query_scalar("SELECT stock FROM medications WHERE id = ?")
        .bind(id)
        .fetch_one(db)
        .await
        .expect("medication missing")
}

pub async fn count(db: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db)
        .await
        .expect("count query failed")
}
