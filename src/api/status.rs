use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::ApiResponse;

pub fn status_routes(db: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(database_check))
        .with_state(db)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "life-tracker",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn database_check(State(db): State<PgPool>) -> AppResult<ApiResponse<Value>> {
    let database: String = sqlx::query_scalar("SELECT current_database()")
        .fetch_one(&db)
        .await?;

    tracing::debug!(%database, "database reachable");
    Ok(ApiResponse::ok(
        StatusCode::OK,
        "API is running and the database is reachable.",
        json!({ "database": database }),
    ))
}
