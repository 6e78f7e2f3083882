use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation::{validate_currency, validate_goal_status};

pub const VALID_CURRENCIES: [&str; 3] = ["USD", "EUR", "CRC"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "goal_status")]
pub enum GoalStatus {
    #[default]
    Pending,
    #[serde(rename = "In progress")]
    #[sqlx(rename = "In progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::Pending,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "Pending",
            GoalStatus::InProgress => "In progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GoalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| format!("Unknown goal status '{}'", value))
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

/// A goal as returned by the API, objectives included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalWithObjectives {
    #[serde(flatten)]
    pub goal: Goal,
    pub objectives: Vec<Objective>,
}

/// Measurable step towards a goal. An objective is numeric
/// (`start_number..end_number`), boolean, or monetary
/// (`start_value..end_value` in `currency_unit`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Objective {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_number: Option<i32>,
    pub end_number: Option<i32>,
    pub is_boolean: bool,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
    pub currency_unit: Option<String>,
    pub goal_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 100, message = "Length must be between 1 and 100."))]
    pub name: String,

    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    pub description: String,

    pub date: NaiveDate,

    #[validate(custom(function = "validate_goal_status"))]
    pub status: Option<String>,
}

impl CreateGoalRequest {
    pub fn status(&self) -> GoalStatus {
        self.status
            .as_deref()
            .and_then(|status| status.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_objective_bounds", skip_on_field_errors = false))]
pub struct CreateObjectiveRequest {
    #[validate(length(min = 1, max = 100, message = "Length must be between 1 and 100."))]
    pub name: String,

    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    pub description: String,

    pub start_number: Option<i32>,
    pub end_number: Option<i32>,

    /// Accepts `true`/`false` as well as the legacy `0`/`1`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_boolean: Option<bool>,

    pub start_value: Option<f64>,
    pub end_value: Option<f64>,

    #[validate(
        length(max = 10, message = "Longer than maximum length 10."),
        custom(function = "validate_currency")
    )]
    pub currency_unit: Option<String>,

    pub goal_id: Uuid,
}

fn validate_objective_bounds(request: &CreateObjectiveRequest) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (request.start_value, request.end_value) {
        if start > end {
            let mut error = ValidationError::new("start_value");
            error.message = Some("start_value cannot be greater than end_value.".into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<Flag>::deserialize(deserializer)?;
    Ok(flag.map(|flag| match flag {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    }))
}
