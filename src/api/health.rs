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
    ApiResponse, CreateMenuRequest, CreateNutritionRequest, CreateWeekMenuRequest,
    CreateWeightRequest, Menu, Nutrition, WeekMenu, Weight,
};
use crate::services::HealthService;

#[derive(Clone)]
pub struct HealthState {
    pub health_service: HealthService,
}

pub fn health_routes(db: PgPool) -> Router {
    let shared_state = HealthState {
        health_service: HealthService::new(db),
    };

    Router::new()
        .route("/health/add-weight/", post(add_weight))
        .route("/health/get-weights/", get(get_weights))
        .route("/health/add-nutrition/", post(add_nutrition))
        .route("/health/get-nutrition/", get(get_nutrition))
        .route("/health/add-menu/", post(add_menu))
        .route("/health/add-week-menu/", post(add_week_menu))
        .route("/health/get-menu-week/:menu_week_id", get(get_menu_week))
        .with_state(shared_state)
}

pub async fn add_weight(
    State(state): State<HealthState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateWeightRequest>, AppError>,
) -> AppResult<ApiResponse<Weight>> {
    request.validate()?;

    let weight = state.health_service.create_weight(request).await?;
    Ok(ApiResponse::created("Weight", weight))
}

pub async fn get_weights(State(state): State<HealthState>) -> AppResult<ApiResponse<Vec<Weight>>> {
    let weights = state.health_service.get_weights().await?;
    Ok(ApiResponse::retrieved("Weight", weights))
}

pub async fn add_nutrition(
    State(state): State<HealthState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateNutritionRequest>, AppError>,
) -> AppResult<ApiResponse<Nutrition>> {
    request.validate()?;

    let nutrition = state.health_service.create_nutrition(request).await?;
    Ok(ApiResponse::created("Nutrition", nutrition))
}

pub async fn get_nutrition(State(state): State<HealthState>) -> AppResult<ApiResponse<Vec<Nutrition>>> {
    let items = state.health_service.get_nutrition().await?;
    Ok(ApiResponse::retrieved("Nutrition", items))
}

pub async fn add_menu(
    State(state): State<HealthState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateMenuRequest>, AppError>,
) -> AppResult<ApiResponse<Menu>> {
    request.validate()?;

    let menu = state.health_service.create_menu(request).await?;
    Ok(ApiResponse::created("Menu", menu))
}

pub async fn add_week_menu(
    State(state): State<HealthState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateWeekMenuRequest>, AppError>,
) -> AppResult<ApiResponse<WeekMenu>> {
    request.validate()?;

    let week = state.health_service.create_week_menu(request).await?;
    Ok(ApiResponse::created("Menu", week))
}

/// An unknown week id yields an empty `days` list rather than a 404.
pub async fn get_menu_week(
    State(state): State<HealthState>,
    WithRejection(Path(menu_week_id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<ApiResponse<WeekMenu>> {
    let week = state.health_service.get_menu_week(menu_week_id).await?;
    Ok(ApiResponse::retrieved("Menu", week))
}
