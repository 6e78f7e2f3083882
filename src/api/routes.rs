use anyhow::Result;
use axum::{http::Uri, response::Redirect, routing::get, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::docs::docs_routes;
use super::gemini::gemini_routes;
use super::goals::goal_routes;
use super::health::health_routes;
use super::hobbies::hobby_routes;
use super::status::status_routes;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::frontend::frontend_routes;
use crate::services::GeminiService;

/// Full application router: JSON API, docs and the HTML pages.
pub fn create_routes(db: PgPool, config: &AppConfig) -> Result<Router> {
    let gemini_service = GeminiService::new(config.gemini.clone())?;

    let router = Router::new()
        .route("/", get(|| async { Redirect::to("/docs") }))
        .merge(status_routes(db.clone()))
        .merge(docs_routes(config))
        .merge(goal_routes(db.clone()))
        .merge(health_routes(db.clone()))
        .merge(hobby_routes(db.clone()))
        .merge(gemini_routes(gemini_service))
        .nest("/app", frontend_routes(db, config))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(router)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
