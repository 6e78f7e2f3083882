use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ActivityLog, CreateActivityRequest};

const ACTIVITY_COLUMNS: &str = "id, date, title, rating, category, created_at";

#[derive(Clone)]
pub struct HobbyService {
    db: PgPool,
}

impl HobbyService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_activity(&self, request: CreateActivityRequest) -> Result<ActivityLog> {
        let category = request
            .category()
            .with_context(|| format!("Unknown activity category '{}'", request.category))?;

        let sql = format!(
            "INSERT INTO hobbies_activity_log (id, date, title, rating, category) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ACTIVITY_COLUMNS
        );

        let activity = sqlx::query_as::<_, ActivityLog>(&sql)
            .bind(Uuid::new_v4())
            .bind(request.date)
            .bind(&request.title)
            .bind(request.rating)
            .bind(category)
            .fetch_one(&self.db)
            .await
            .context("Failed to create activity log")?;

        tracing::info!(
            activity_id = %activity.id,
            category = activity.category.as_str(),
            rating = activity.rating,
            "activity logged"
        );
        Ok(activity)
    }

    /// All entries, oldest first.
    pub async fn get_activity_log(&self) -> Result<Vec<ActivityLog>> {
        let sql = format!(
            "SELECT {} FROM hobbies_activity_log ORDER BY date ASC, created_at ASC",
            ACTIVITY_COLUMNS
        );
        let entries = sqlx::query_as::<_, ActivityLog>(&sql)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch activity log")?;

        Ok(entries)
    }
}
