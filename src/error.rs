use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::error::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::{validation_messages, ApiResponse};

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Unique `(menu_week_id, day_of_week)` on `health_nutrition_menu`.
const MENU_WEEK_DAY_CONSTRAINT: &str = "menu_week_day_unique";

/// Every failure a handler can produce. Rendered as an error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", validation_messages(.0).join("; "))]
    Validation(#[from] ValidationErrors),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    InvalidPath(#[from] PathRejection),

    /// Rejected by a database rule, e.g. a second menu for the same day of a week.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced row (goal, nutrition item) does not exist.
    #[error("{0}")]
    ForeignKey(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Error requesting to Gemini: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("{0:#}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidPath(_)
            | AppError::BadRequest(_)
            | AppError::ForeignKey(_)
            | AppError::Upstream(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Constraint violations the client can fix: foreign keys (23503) and duplicates (23505).
fn constraint_violation(db_err: &dyn DatabaseError) -> Option<AppError> {
    if db_err.is_foreign_key_violation() {
        return Some(AppError::ForeignKey(format!(
            "Error adding record. Check the foreign keys. {}",
            db_err.message()
        )));
    }

    if db_err.is_unique_violation() {
        let message = match db_err.constraint() {
            Some(MENU_WEEK_DAY_CONSTRAINT) => {
                "Error adding record. That day already has a menu in this week.".to_string()
            }
            _ => format!("Error adding record. Duplicate value. {}", db_err.message()),
        };
        return Some(AppError::BadRequest(message));
    }

    None
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(app_err) = constraint_violation(&**db_err) {
                return app_err;
            }
        }
        AppError::Database(err)
    }
}

/// Services report through `anyhow`; recover typed errors they raised or wrapped.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<AppError>() {
            Ok(app_err) => return app_err,
            Err(err) => err,
        };

        if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
            if let Some(app_err) = constraint_violation(&**db_err) {
                return app_err;
            }
        }

        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let data = match &self {
            AppError::Validation(errors) => Some(json!({ "errors": validation_messages(errors) })),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        ApiResponse::error(status, message, data).into_response()
    }
}
