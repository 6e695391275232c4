use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET / - welcome banner
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Pharmacy API Backend!",
        "status": "Online",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - liveness probe including a database ping
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": if database == "healthy" { "healthy" } else { "degraded" },
        "database": database,
    }))
}
