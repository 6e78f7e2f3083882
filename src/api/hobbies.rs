use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{ActivityLog, ApiResponse, CreateActivityRequest};
use crate::services::HobbyService;

#[derive(Clone)]
pub struct HobbyState {
    pub hobby_service: HobbyService,
}

pub fn hobby_routes(db: PgPool) -> Router {
    let shared_state = HobbyState {
        hobby_service: HobbyService::new(db),
    };

    Router::new()
        .route("/hobbies/add-activity/", post(add_activity))
        .route("/hobbies/get-activity-log/", get(get_activity_log))
        .with_state(shared_state)
}

pub async fn add_activity(
    State(state): State<HobbyState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateActivityRequest>, AppError>,
) -> AppResult<ApiResponse<ActivityLog>> {
    request.validate()?;

    let activity = state.hobby_service.create_activity(request).await?;
    Ok(ApiResponse::created("ActivityLog", activity))
}

pub async fn get_activity_log(
    State(state): State<HobbyState>,
) -> AppResult<ApiResponse<Vec<ActivityLog>>> {
    let entries = state.hobby_service.get_activity_log().await?;
    Ok(ApiResponse::retrieved("ActivityLog", entries))
}
