use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    ApiResponse, CreateGoalRequest, CreateObjectiveRequest, Goal, GoalWithObjectives, Objective,
};
use crate::services::GoalService;

#[derive(Clone)]
pub struct GoalState {
    pub goal_service: GoalService,
}

/// Goal and objective endpoints. Objective listings live under the plural `/goals` prefix.
pub fn goal_routes(db: PgPool) -> Router {
    let shared_state = GoalState {
        goal_service: GoalService::new(db),
    };

    Router::new()
        .route("/goal/add-goal/", post(add_goal))
        .route("/goal/get-goals/", get(get_goals))
        .route("/goal/get-goal/:goal_id", get(get_goal))
        .route("/goal/add-objective/", post(add_objective))
        .route("/goals/get-objectives/", get(get_objectives))
        .route("/goals/get-objectives-by-goal/:goal_id", get(get_objectives_by_goal))
        .with_state(shared_state)
}

pub async fn add_goal(
    State(state): State<GoalState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateGoalRequest>, AppError>,
) -> AppResult<ApiResponse<Goal>> {
    request.validate()?;

    let goal = state.goal_service.create_goal(request).await?;
    Ok(ApiResponse::created("Goal", goal))
}

pub async fn get_goals(State(state): State<GoalState>) -> AppResult<ApiResponse<Vec<GoalWithObjectives>>> {
    let goals = state.goal_service.get_goals().await?;
    Ok(ApiResponse::retrieved("Goal", goals))
}

pub async fn get_goal(
    State(state): State<GoalState>,
    WithRejection(Path(goal_id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<ApiResponse<GoalWithObjectives>> {
    let goal = state
        .goal_service
        .get_goal(goal_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Goal with id {} not found", goal_id)))?;

    Ok(ApiResponse::retrieved("Goal", goal))
}

pub async fn add_objective(
    State(state): State<GoalState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateObjectiveRequest>, AppError>,
) -> AppResult<ApiResponse<Objective>> {
    request.validate()?;

    let objective = state.goal_service.create_objective(request).await?;
    Ok(ApiResponse::created("Objective", objective))
}

pub async fn get_objectives(State(state): State<GoalState>) -> AppResult<ApiResponse<Vec<Objective>>> {
    let objectives = state.goal_service.get_objectives().await?;
    Ok(ApiResponse::retrieved("Objective", objectives))
}

pub async fn get_objectives_by_goal(
    State(state): State<GoalState>,
    WithRejection(Path(goal_id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<ApiResponse<Vec<Objective>>> {
    let objectives = state.goal_service.get_objectives_by_goal(goal_id).await?;
    Ok(ApiResponse::retrieved("Objective", objectives))
}
