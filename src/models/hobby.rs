use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::validation::validate_activity_category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "activity_category")]
pub enum ActivityCategory {
    Cine,
    Pelicula,
    Serie,
    Juego,
    Libro,
    Anime,
    Otro,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 7] = [
        ActivityCategory::Cine,
        ActivityCategory::Pelicula,
        ActivityCategory::Serie,
        ActivityCategory::Juego,
        ActivityCategory::Libro,
        ActivityCategory::Anime,
        ActivityCategory::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Cine => "Cine",
            ActivityCategory::Pelicula => "Pelicula",
            ActivityCategory::Serie => "Serie",
            ActivityCategory::Juego => "Juego",
            ActivityCategory::Libro => "Libro",
            ActivityCategory::Anime => "Anime",
            ActivityCategory::Otro => "Otro",
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ActivityCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| format!("Unknown activity category '{}'", value))
    }
}

/// A rated hobby entry: a film, series, game, book...
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub rating: i32,
    pub category: ActivityCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    pub date: NaiveDate,

    /// Trimmed on input, so a blank title fails the length rule.
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 50, message = "Length must be between 1 and 50."))]
    pub title: String,

    #[validate(range(min = 1, max = 10, message = "Must be between 1 and 10."))]
    pub rating: i32,

    #[validate(custom(function = "validate_activity_category"))]
    pub category: String,
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

impl CreateActivityRequest {
    /// Only meaningful after `validate()` succeeded.
    pub fn category(&self) -> Option<ActivityCategory> {
        self.category.parse().ok()
    }
}
