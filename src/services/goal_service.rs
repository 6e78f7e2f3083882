use anyhow::{Context, Result};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    CreateGoalRequest, CreateObjectiveRequest, Goal, GoalWithObjectives, Objective,
};

const GOAL_COLUMNS: &str = "id, name, description, date, status, created_at";
const OBJECTIVE_COLUMNS: &str = "id, name, description, start_number, end_number, is_boolean, \
     start_value, end_value, currency_unit, goal_id, created_at";

#[derive(Clone)]
pub struct GoalService {
    db: PgPool,
}

impl GoalService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // Goal operations
    pub async fn create_goal(&self, request: CreateGoalRequest) -> Result<Goal> {
        let sql = format!(
            "INSERT INTO goals_goal (id, name, description, date, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            GOAL_COLUMNS
        );

        let goal = sqlx::query_as::<_, Goal>(&sql)
            .bind(Uuid::new_v4())
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.date)
            .bind(request.status())
            .fetch_one(&self.db)
            .await
            .context("Failed to create goal")?;

        tracing::info!(goal_id = %goal.id, name = %goal.name, "goal created");
        Ok(goal)
    }

    pub async fn get_goals(&self) -> Result<Vec<GoalWithObjectives>> {
        let sql = format!(
            "SELECT {} FROM goals_goal ORDER BY date ASC, created_at ASC",
            GOAL_COLUMNS
        );
        let goals = sqlx::query_as::<_, Goal>(&sql)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch goals")?;

        let mut objectives_by_goal: HashMap<Uuid, Vec<Objective>> = HashMap::new();
        for objective in self.get_objectives().await? {
            objectives_by_goal
                .entry(objective.goal_id)
                .or_default()
                .push(objective);
        }

        let goals = goals
            .into_iter()
            .map(|goal| {
                let objectives = objectives_by_goal.remove(&goal.id).unwrap_or_default();
                GoalWithObjectives { goal, objectives }
            })
            .collect();

        Ok(goals)
    }

    pub async fn get_goal(&self, goal_id: Uuid) -> Result<Option<GoalWithObjectives>> {
        let sql = format!("SELECT {} FROM goals_goal WHERE id = $1", GOAL_COLUMNS);
        let goal = sqlx::query_as::<_, Goal>(&sql)
            .bind(goal_id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch goal")?;

        let Some(goal) = goal else {
            return Ok(None);
        };

        let objectives = self.get_objectives_by_goal(goal_id).await?;
        Ok(Some(GoalWithObjectives { goal, objectives }))
    }

    async fn goal_exists(&self, goal_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM goals_goal WHERE id = $1)")
            .bind(goal_id)
            .fetch_one(&self.db)
            .await
            .context("Failed to look up goal")?;

        Ok(exists)
    }

    // Objective operations
    pub async fn create_objective(&self, request: CreateObjectiveRequest) -> Result<Objective> {
        if !self.goal_exists(request.goal_id).await? {
            return Err(AppError::ForeignKey(format!(
                "Error adding objective. Goal with id {} not found",
                request.goal_id
            ))
            .into());
        }

        let sql = format!(
            "INSERT INTO goals_objective (\
                 id, name, description, start_number, end_number, is_boolean, \
                 start_value, end_value, currency_unit, goal_id\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            OBJECTIVE_COLUMNS
        );

        // A goal deleted between the check and the insert still surfaces as a
        // foreign-key violation, which the error layer maps the same way.
        let objective = sqlx::query_as::<_, Objective>(&sql)
            .bind(Uuid::new_v4())
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.start_number)
            .bind(request.end_number)
            .bind(request.is_boolean.unwrap_or(false))
            .bind(request.start_value)
            .bind(request.end_value)
            .bind(&request.currency_unit)
            .bind(request.goal_id)
            .fetch_one(&self.db)
            .await
            .context("Failed to create objective")?;

        tracing::info!(
            objective_id = %objective.id,
            goal_id = %objective.goal_id,
            "objective created"
        );
        Ok(objective)
    }

    pub async fn get_objectives(&self) -> Result<Vec<Objective>> {
        let sql = format!(
            "SELECT {} FROM goals_objective ORDER BY created_at ASC",
            OBJECTIVE_COLUMNS
        );
        let objectives = sqlx::query_as::<_, Objective>(&sql)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch objectives")?;

        Ok(objectives)
    }

    pub async fn get_objectives_by_goal(&self, goal_id: Uuid) -> Result<Vec<Objective>> {
        let sql = format!(
            "SELECT {} FROM goals_objective WHERE goal_id = $1 ORDER BY created_at ASC",
            OBJECTIVE_COLUMNS
        );
        let objectives = sqlx::query_as::<_, Objective>(&sql)
            .bind(goal_id)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch objectives for goal")?;

        Ok(objectives)
    }
}
