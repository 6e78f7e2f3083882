use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, GeminiAnswer, GeminiRequest};
use crate::services::GeminiService;

#[derive(Clone)]
pub struct GeminiState {
    pub gemini_service: GeminiService,
}

pub fn gemini_routes(gemini_service: GeminiService) -> Router {
    Router::new()
        .route("/gemini/", post(ask_gemini))
        .with_state(GeminiState { gemini_service })
}

/// Any upstream failure, including a missing API key, becomes a 400 envelope.
pub async fn ask_gemini(
    State(state): State<GeminiState>,
    WithRejection(Json(request), _): WithRejection<Json<GeminiRequest>, AppError>,
) -> AppResult<ApiResponse<GeminiAnswer>> {
    request.validate()?;

    let answer = state
        .gemini_service
        .generate(&request.prompt, request.system_instruction())
        .await
        .map_err(|err| AppError::Upstream(format!("{:#}", err)))?;

    Ok(ApiResponse::retrieved("Gemini", answer))
}
