use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Weight
// ============================================================================

/// Body-composition reading from a smart scale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Weight {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Kilograms
    pub weight: f64,
    /// Body mass index
    pub imc: f64,
    pub body_fat: f64,
    pub subcutaneous_fat: f64,
    pub visceral_fat: f64,
    pub muscle_mass: f64,
    pub created_at: DateTime<Utc>,
}

/// Older clients post camelCase names (`bodyFat`, `viseralFat`, ...); both spellings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWeightRequest {
    pub date: NaiveDate,

    #[validate(range(min = 0.0, max = 300.0, message = "Must be between 0 and 300."))]
    pub weight: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "Must be between 0 and 100."))]
    pub imc: f64,

    #[serde(alias = "bodyFat")]
    #[validate(range(min = 0.0, max = 100.0, message = "Must be between 0 and 100."))]
    pub body_fat: f64,

    #[serde(alias = "subcutaneousFat")]
    #[validate(range(min = 0.0, max = 100.0, message = "Must be between 0 and 100."))]
    pub subcutaneous_fat: f64,

    #[serde(alias = "viseralFat", alias = "visceralFat")]
    #[validate(range(min = 0.0, max = 100.0, message = "Must be between 0 and 100."))]
    pub visceral_fat: f64,

    #[serde(alias = "muscleMass")]
    #[validate(range(min = 0.0, max = 100.0, message = "Must be between 0 and 100."))]
    pub muscle_mass: f64,
}

// ============================================================================
// Nutrition
// ============================================================================

/// A dish or food item that menus refer to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Nutrition {
    pub id: Uuid,
    pub food_type: String,
    pub name: String,
    pub portion: String,
    pub example: String,
    pub recipe: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNutritionRequest {
    #[validate(length(min = 1, max = 40, message = "Length must be between 1 and 40."))]
    pub food_type: String,

    #[validate(length(min = 1, max = 100, message = "Length must be between 1 and 100."))]
    pub name: String,

    #[validate(length(max = 36, message = "Longer than maximum length 36."))]
    pub portion: String,

    #[validate(length(max = 100, message = "Longer than maximum length 100."))]
    #[serde(default)]
    pub example: String,

    #[validate(length(max = 500, message = "Longer than maximum length 500."))]
    #[serde(default)]
    pub recipe: String,

    #[validate(range(min = 0.0, message = "Must be greater than or equal to 0."))]
    pub price: f64,
}

// ============================================================================
// Menu
// ============================================================================

/// One day of a weekly menu. Every meal slot points at a [`Nutrition`] row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: Uuid,
    /// ISO weekday, Monday = 1
    pub day_of_week: i16,
    pub menu_week_id: Uuid,
    pub breakfast_id: Uuid,
    pub breakfast_snack_id: Uuid,
    pub lunch_id: Uuid,
    pub afternoon_snack_id: Uuid,
    pub dinner_id: Uuid,
    pub night_snack_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DayMenu {
    #[validate(range(min = 1, max = 7, message = "Must be between 1 and 7."))]
    pub day_of_week: i16,
    pub breakfast_id: Uuid,
    pub breakfast_snack_id: Uuid,
    pub lunch_id: Uuid,
    pub afternoon_snack_id: Uuid,
    pub dinner_id: Uuid,
    pub night_snack_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMenuRequest {
    pub menu_week_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub day: DayMenu,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_week_days"))]
pub struct CreateWeekMenuRequest {
    /// Generated when absent.
    pub menu_week_id: Option<Uuid>,

    #[validate(nested)]
    pub days: Vec<DayMenu>,
}

fn validate_week_days(request: &CreateWeekMenuRequest) -> Result<(), ValidationError> {
    if request.days.is_empty() || request.days.len() > 7 {
        let mut error = ValidationError::new("days");
        error.message = Some("days: A week has between 1 and 7 days.".into());
        return Err(error);
    }

    let mut seen = HashSet::new();
    for day in &request.days {
        if !seen.insert(day.day_of_week) {
            let mut error = ValidationError::new("duplicate_day");
            error.message = Some(format!("day_of_week {} appears more than once.", day.day_of_week).into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekMenu {
    pub menu_week_id: Uuid,
    pub days: Vec<Menu>,
}
