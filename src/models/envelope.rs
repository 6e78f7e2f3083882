use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    Error,
}

/// JSON body shared by every endpoint: `{result, message, status_code, data}`.
///
/// The HTTP status of the response always equals `status_code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Outcome,
    pub message: String,
    pub status_code: u16,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            result: Outcome::Ok,
            message: message.into(),
            status_code: status.as_u16(),
            data: Some(data),
        }
    }

    pub fn created(object: &str, data: T) -> Self {
        Self::ok(StatusCode::CREATED, generate_message(object, Operation::Create), data)
    }

    pub fn retrieved(object: &str, data: T) -> Self {
        Self::ok(StatusCode::OK, generate_message(object, Operation::Get), data)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_ok(&self) -> bool {
        self.result == Outcome::Ok
    }
}

impl ApiResponse<Value> {
    pub fn error(status: StatusCode, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            result: Outcome::Error,
            message: message.into(),
            status_code: status.as_u16(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Error,
}

pub fn generate_message(object: &str, operation: Operation) -> String {
    match operation {
        Operation::Create => format!("[{}] created successfully.", object),
        Operation::Get => format!("[{}] retrieved successfully.", object),
        Operation::Error => format!("Error processing the request for [{}].", object),
    }
}
