use anyhow::{Context, Result};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::{
    CreateMenuRequest, CreateNutritionRequest, CreateWeekMenuRequest, CreateWeightRequest,
    DayMenu, Menu, Nutrition, WeekMenu, Weight,
};

const WEIGHT_COLUMNS: &str = "id, date, weight, imc, body_fat, subcutaneous_fat, visceral_fat, \
     muscle_mass, created_at";
const NUTRITION_COLUMNS: &str = "id, food_type, name, portion, example, recipe, price, created_at";
const MENU_COLUMNS: &str = "id, day_of_week, menu_week_id, breakfast_id, breakfast_snack_id, \
     lunch_id, afternoon_snack_id, dinner_id, night_snack_id, created_at";

#[derive(Clone)]
pub struct HealthService {
    db: PgPool,
}

impl HealthService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ========================================================================
    // Weight
    // ========================================================================

    pub async fn create_weight(&self, request: CreateWeightRequest) -> Result<Weight> {
        let sql = format!(
            "INSERT INTO health_weight (\
                 id, date, weight, imc, body_fat, subcutaneous_fat, visceral_fat, muscle_mass\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            WEIGHT_COLUMNS
        );

        let weight = sqlx::query_as::<_, Weight>(&sql)
            .bind(Uuid::new_v4())
            .bind(request.date)
            .bind(request.weight)
            .bind(request.imc)
            .bind(request.body_fat)
            .bind(request.subcutaneous_fat)
            .bind(request.visceral_fat)
            .bind(request.muscle_mass)
            .fetch_one(&self.db)
            .await
            .context("Failed to create weight log")?;

        tracing::info!(weight_id = %weight.id, date = %weight.date, "weight log created");
        Ok(weight)
    }

    pub async fn get_weights(&self) -> Result<Vec<Weight>> {
        let sql = format!(
            "SELECT {} FROM health_weight ORDER BY date ASC, created_at ASC",
            WEIGHT_COLUMNS
        );
        let weights = sqlx::query_as::<_, Weight>(&sql)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch weight logs")?;

        Ok(weights)
    }

    // ========================================================================
    // Nutrition
    // ========================================================================

    pub async fn create_nutrition(&self, request: CreateNutritionRequest) -> Result<Nutrition> {
        let sql = format!(
            "INSERT INTO health_nutrition (id, food_type, name, portion, example, recipe, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            NUTRITION_COLUMNS
        );

        let nutrition = sqlx::query_as::<_, Nutrition>(&sql)
            .bind(Uuid::new_v4())
            .bind(&request.food_type)
            .bind(&request.name)
            .bind(&request.portion)
            .bind(&request.example)
            .bind(&request.recipe)
            .bind(request.price)
            .fetch_one(&self.db)
            .await
            .context("Failed to create nutrition item")?;

        tracing::info!(nutrition_id = %nutrition.id, name = %nutrition.name, "nutrition item created");
        Ok(nutrition)
    }

    pub async fn get_nutrition(&self) -> Result<Vec<Nutrition>> {
        let sql = format!(
            "SELECT {} FROM health_nutrition ORDER BY food_type ASC, name ASC",
            NUTRITION_COLUMNS
        );
        let items = sqlx::query_as::<_, Nutrition>(&sql)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch nutrition items")?;

        Ok(items)
    }

    // ========================================================================
    // Menus
    // ========================================================================

    pub async fn create_menu(&self, request: CreateMenuRequest) -> Result<Menu> {
        let menu = insert_menu(&self.db, request.menu_week_id, &request.day).await?;
        tracing::info!(menu_id = %menu.id, menu_week_id = %menu.menu_week_id, "menu created");
        Ok(menu)
    }

    /// Inserts every day of the week in one transaction; a bad day rolls back the others.
    pub async fn create_week_menu(&self, request: CreateWeekMenuRequest) -> Result<WeekMenu> {
        let menu_week_id = request.menu_week_id.unwrap_or_else(Uuid::new_v4);

        let mut tx = self.db.begin().await.context("Failed to open transaction")?;
        let mut days = Vec::with_capacity(request.days.len());
        for day in &request.days {
            days.push(insert_menu(&mut *tx, menu_week_id, day).await?);
        }
        tx.commit().await.context("Failed to commit week menu")?;

        days.sort_by_key(|menu| menu.day_of_week);
        tracing::info!(%menu_week_id, days = days.len(), "week menu created");

        Ok(WeekMenu { menu_week_id, days })
    }

    pub async fn get_menu_week(&self, menu_week_id: Uuid) -> Result<WeekMenu> {
        let sql = format!(
            "SELECT {} FROM health_nutrition_menu WHERE menu_week_id = $1 ORDER BY day_of_week ASC",
            MENU_COLUMNS
        );
        let days = sqlx::query_as::<_, Menu>(&sql)
            .bind(menu_week_id)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch week menu")?;

        Ok(WeekMenu { menu_week_id, days })
    }
}

async fn insert_menu<'e, E>(executor: E, menu_week_id: Uuid, day: &DayMenu) -> Result<Menu>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO health_nutrition_menu (\
             id, day_of_week, menu_week_id, breakfast_id, breakfast_snack_id, \
             lunch_id, afternoon_snack_id, dinner_id, night_snack_id\
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
        MENU_COLUMNS
    );

    let menu = sqlx::query_as::<_, Menu>(&sql)
        .bind(Uuid::new_v4())
        .bind(day.day_of_week)
        .bind(menu_week_id)
        .bind(day.breakfast_id)
        .bind(day.breakfast_snack_id)
        .bind(day.lunch_id)
        .bind(day.afternoon_snack_id)
        .bind(day.dinner_id)
        .bind(day.night_snack_id)
        .fetch_one(executor)
        .await
        .with_context(|| format!("Failed to create menu for day {}", day.day_of_week))?;

    Ok(menu)
}
